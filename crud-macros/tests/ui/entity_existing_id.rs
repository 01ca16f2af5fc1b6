use crud_domain::entity::Entity;
use crud_macros::entity;
use serde::{Deserialize, Serialize};

#[entity(key = u32)]
#[derive(Serialize, Deserialize, PartialEq)]
struct Label {
    text: String,
    /// 已有的 id 字段会被移到最前并保留原定义
    pub id: u32,
}

fn assert_serde<T: Serialize + for<'de> Deserialize<'de>>() {}

fn main() {
    assert_serde::<Label>();
    let label = Label {
        id: 9,
        text: "x".to_string(),
    };
    assert_eq!(*label.key(), 9_u32);
    assert_eq!(label.clone(), label);
}
