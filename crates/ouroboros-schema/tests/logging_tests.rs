//! Tracing output of schema parsing

use ouroboros_schema::{array, object, string, Shape, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// Counts events at one level
struct LevelCounter {
    level: Level,
    count: Arc<AtomicUsize>,
}

impl<S: Subscriber> Layer<S> for LevelCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == self.level {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn count_events<F: FnOnce()>(level: Level, f: F) -> usize {
    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(LevelCounter {
        level,
        count: Arc::clone(&count),
    });
    tracing::subscriber::with_default(subscriber, f);
    count.load(Ordering::SeqCst)
}

#[test]
fn test_nested_failure_logs_debug_once() {
    let lead = object(Shape::new().field("name", string().min(3)));
    let team = object(Shape::new().field("lead", lead));
    let schema = object(Shape::new().field("teams", array(team)));
    let input = Value::object([(
        "teams",
        Value::List(vec![Value::object([(
            "lead",
            Value::object([("name", Value::from("jo"))]),
        )])]),
    )]);

    let debug = count_events(Level::DEBUG, || {
        assert!(schema.parse(&input).is_err());
    });
    assert_eq!(debug, 1);
}

#[test]
fn test_successful_parse_logs_no_debug() {
    let schema = object(Shape::new().field("name", string().min(3)));
    let input = Value::object([("name", Value::from("joanna"))]);

    let debug = count_events(Level::DEBUG, || {
        assert!(schema.parse(&input).is_ok());
    });
    assert_eq!(debug, 0);
}
