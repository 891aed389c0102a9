use escmd_macros::entity_id;
use std::str::FromStr;
use uuid::Uuid;

#[entity_id]
struct UserId(Uuid);

#[entity_id]
struct Seq(u64);

fn main() {
    let raw = Uuid::new_v4();
    let id = UserId::new(raw);
    let _ = format!("{:?}", id);
    assert_eq!(UserId::from_str(&id.to_string()).ok(), Some(id.clone()));
    assert_eq!(id.into_inner(), raw);

    assert_eq!("42".parse::<Seq>().ok(), Some(Seq::from(42)));
    assert!("x".parse::<Seq>().is_err());
}
