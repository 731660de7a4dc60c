//! Annotation event feed.
//!
//! The feed is the ordered stream of [`AnnotationEvent`]s produced by the
//! source analyzer, encoded as a sequence of JSON values (usually one per
//! line). Event order is preserved: it decides the order of members in the
//! generated files.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use annogen_core::AnnotationEvent;
use serde_json::Deserializer;
use tracing::{debug, warn};

use crate::error::{RuntimeError, RuntimeResult};

/// Decodes every event of a feed read from `reader`.
///
/// Stops at the first malformed event, reporting its zero-based index.
pub fn read_events<R: Read>(reader: R) -> RuntimeResult<Vec<AnnotationEvent>> {
    let stream = Deserializer::from_reader(BufReader::new(reader)).into_iter::<AnnotationEvent>();

    let mut events = Vec::new();
    for (index, event) in stream.enumerate() {
        let event = event.map_err(|source| RuntimeError::Feed { index, source })?;
        events.push(event);
    }

    if events.is_empty() {
        warn!("Annotation feed is empty, nothing will be generated");
    } else {
        debug!(count = events.len(), "Annotation feed decoded");
    }

    Ok(events)
}

/// Decodes the feed stored at `path`.
pub fn read_events_from_file<P: AsRef<Path>>(path: P) -> RuntimeResult<Vec<AnnotationEvent>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| RuntimeError::io(path, e))?;
    debug!(path = %path.display(), "Reading annotation feed");
    read_events(file)
}

/// Decodes a feed held in memory.
pub fn parse_events(input: &str) -> RuntimeResult<Vec<AnnotationEvent>> {
    read_events(input.as_bytes())
}
