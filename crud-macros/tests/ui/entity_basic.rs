use crud_domain::entity::Entity;
use crud_macros::entity;

#[entity]
struct Category {
    name: String,
}

fn main() {
    let mut category = Category {
        name: "books".to_string(),
        ..Default::default()
    };
    assert_eq!(*category.key(), 0_i64);

    category.set_key(3);
    let copy = category.clone();
    assert_eq!(copy.id, 3);
    assert!(copy.validation_errors().is_empty());
    assert!(format!("{copy:?}").contains("books"));
}
