//! Snapshot feed produced by a full run, read back the way a viewer would.

use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use trust_core::config::Config;
use trust_core::output::JsonlFeed;
use trust_core::{create_simulation, Belief};
use trust_events::{fixtures, read_feed};

/// Writer handing its bytes back to the test after the run
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_feed_has_one_line_per_committed_round() {
    let mut config = Config::default();
    config.population.width = 16;
    config.population.height = 10;

    let buffer = SharedBuffer::default();
    let (mut sim, _) = create_simulation(&config).unwrap();
    sim.add_observer(JsonlFeed::new(buffer.clone()));
    let summary = sim.run().unwrap();

    let bytes = buffer.0.lock().unwrap().clone();
    let snapshots = read_feed(Cursor::new(bytes)).unwrap();

    assert_eq!(snapshots.len() as u64, summary.rounds + 1);
    for (index, snapshot) in snapshots.iter().enumerate() {
        assert_eq!(snapshot.round, index as u64);
        assert_eq!(snapshot.width(), 16);
        assert_eq!(snapshot.height(), 10);
    }

    let last = snapshots.last().unwrap();
    assert_eq!(last.counts(), summary.final_counts);
    assert_eq!(last.render(), sim.population().render_map());
}

#[test]
fn test_fixture_codes_are_beliefs() {
    for snapshot in fixtures::sample_feed() {
        for code in snapshot.map.iter().flatten() {
            assert!(Belief::from_code(*code).is_some(), "unknown code {code}");
        }
    }
}
