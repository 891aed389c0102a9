use escmd_domain::entity::Entity;
use escmd_macros::entity;

#[entity]
struct Note {
    body: String,
}

#[entity(id = u64, data = payload, debug = false)]
struct Sensor {
    payload: Vec<f64>,
}

impl std::fmt::Debug for Sensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sensor({})", self.id)
    }
}

fn main() {
    let note = Note::new("n-1".to_string(), 1);
    assert_eq!(note.id(), "n-1");
    assert!(note.body.is_empty());
    let _ = format!("{:?}", note);

    let mut sensor = Sensor::new(7, 3);
    sensor.payload.push(1.5);
    assert_eq!(sensor.version(), 3);
    let data: &Vec<f64> = sensor.data();
    assert_eq!(data.len(), 1);
    let _ = format!("{:?}", sensor);
}
