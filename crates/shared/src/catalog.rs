//! Donut assortment offered on the storefront.

use crate::domain::{Product, ProductId};

const PRODUCTS: &[(u32, &str, u32, &str)] = &[
    (
        1,
        "Классический с сахаром",
        80,
        "Традиционный воздушный пончик с сахарной пудрой",
    ),
    (2, "Шоколадный рай", 120, "В два раза больше шоколадной начинки!"),
    (3, "Клубничный десерт", 130, "Свежая клубника в нежном креме"),
    (4, "Карамельный", 110, "Соленая карамель и арахис"),
    (
        5,
        "Ванильный нежный",
        90,
        "Классическая ваниль с мадагаскарской ванилью",
    ),
    (6, "Лимонный фреш", 100, "Освежающий лимонный курд"),
];

pub fn default_catalog() -> Vec<Product> {
    PRODUCTS
        .iter()
        .map(|(id, name, price_rub, description)| Product {
            id: ProductId(*id),
            name: (*name).to_string(),
            price_rub: *price_rub,
            description: (*description).to_string(),
        })
        .collect()
}

pub fn find_product(catalog: &[Product], id: ProductId) -> Option<&Product> {
    catalog.iter().find(|product| product.id == id)
}
