use crud_domain::entity::Entity;
use crud_domain::validation::{ValidationResult, Validator};
use crud_macros::entity;

#[entity(key = i64, validate = Self::check)]
struct Product {
    name: String,
    price: i64,
}

impl Product {
    fn check(&self) -> Vec<ValidationResult> {
        Validator::new()
            .required("name", &self.name)
            .range("price", self.price, 1, 1000)
            .finish()
    }
}

fn main() {
    let product = Product::default();
    let errors = product.validation_errors();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].member_names(), ["name".to_string()]);
}
