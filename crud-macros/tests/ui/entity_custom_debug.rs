use crud_domain::entity::Entity;
use crud_macros::entity;
use std::fmt;

#[entity(key = u64, debug = false)]
struct Secret {
    value: String,
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret").field("id", &self.id).finish_non_exhaustive()
    }
}

fn main() {
    let secret = Secret {
        id: 1,
        value: "hunter2".to_string(),
    };
    assert_eq!(*secret.key(), 1_u64);
    assert!(!format!("{secret:?}").contains("hunter2"));
}
