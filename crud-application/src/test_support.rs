use crud_domain::validation::{ValidationResult, Validator};
use crud_macros::entity;

#[entity(key = i64, validate = Self::check)]
#[derive(PartialEq)]
pub(crate) struct Item {
    pub(crate) id: i64,
    pub(crate) name: String,
}

impl Item {
    pub(crate) fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn check(&self) -> Vec<ValidationResult> {
        Validator::new().required("name", &self.name).finish()
    }
}
