use crate::common::*;

#[tokio::test]
async fn test_my_cart_returns_three_lines() {
    let state = setup_state();

    let query = r#"
        query {
            myCart {
                cartId
                lines {
                    id
                    productQuantity
                    product { id name price }
                }
                errorMessage
            }
        }
    "#;

    let data = query_data(&state, query).await;
    let cart = &data["myCart"];
    let lines = cart["lines"].as_array().expect("lines should be a list");

    assert_eq!(cart["cartId"], "123");
    assert!(cart["errorMessage"].is_null());
    assert_eq!(lines.len(), 3);
    for line in lines {
        assert_eq!(line["productQuantity"], 23);
        assert_eq!(line["product"]["name"], "Product A");
        assert_eq!(line["product"]["price"], 1999);
    }
}

#[tokio::test]
async fn test_add_or_update_product_in_cart() {
    let state = setup_state();

    let query = r#"
        mutation {
            addOrUpdateProductInCart(productId: "1", quantity: 2) {
                cartId
                lines { id }
            }
        }
    "#;

    let data = query_data(&state, query).await;

    assert_eq!(data["addOrUpdateProductInCart"]["cartId"], "123");
    assert_eq!(
        data["addOrUpdateProductInCart"]["lines"]
            .as_array()
            .map(Vec::len),
        Some(3)
    );
}
