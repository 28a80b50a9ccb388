use std::fmt::{Debug, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::event::Event;
use tracing::field::{Field, Visit};
use tracing::{span, Id, Level, Metadata, Subscriber};

/// Prints every enabled event on its own line, e.g.
/// `DEBUG arp_resolver::table: arp entry added ip=192.168.7.1 mac=02:aa:00:00:00:01 slot=0`
pub struct LanSubscriber {
    ids: AtomicUsize,
    max_level: Level,
}

impl LanSubscriber {
    pub fn new(verbose: bool) -> Self {
        LanSubscriber {
            ids: AtomicUsize::new(1),
            max_level: if verbose { Level::TRACE } else { Level::INFO },
        }
    }
}

// https://docs.rs/tracing/0.1.7/tracing/subscriber/trait.Subscriber.html
impl Subscriber for LanSubscriber {
    // More verbose levels compare greater
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= &self.max_level
    }

    // Spans are not printed, they just need distinct ids
    fn new_span(&self, _span: &span::Attributes) -> Id {
        let id = self.ids.fetch_add(1, Ordering::SeqCst);
        Id::from_u64(id as u64)
    }

    fn record(&self, _span: &Id, _values: &span::Record) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event) {
        let mut visitor = LineVisitor::new();
        event.record(&mut visitor);
        let metadata = event.metadata();
        println!(
            "{:>5} {}: {}{}",
            metadata.level(),
            metadata.target(),
            visitor.message,
            visitor.fields
        );
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}

struct LineVisitor {
    message: String,
    fields: String,
}

impl LineVisitor {
    fn new() -> Self {
        LineVisitor {
            message: String::new(),
            fields: String::new(),
        }
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_filter() {
        let quiet = LanSubscriber::new(false);
        let verbose = LanSubscriber::new(true);
        assert!(Level::INFO <= quiet.max_level);
        assert!(!(Level::DEBUG <= quiet.max_level));
        assert!(Level::TRACE <= verbose.max_level);
    }

    #[test]
    fn span_ids_increment() {
        let subscriber = LanSubscriber::new(false);
        let first = subscriber.ids.fetch_add(1, Ordering::SeqCst);
        let second = subscriber.ids.fetch_add(1, Ordering::SeqCst);
        assert_eq!(second, first + 1);
    }
}
