use super::reply::{colors, Reply, MAX_FIELDS};
use crate::dataset::counters::{CounterRecord, CounterTable};
use crate::error::AppError;
use crate::format::counters::{format_counter_list, format_counter_tips};
use tracing::{debug, warn};

pub const TIPS_LABEL: &str = "How to Counter";
pub const TIPS_CONTINUED_LABEL: &str = "How to Counter (cont.)";
pub const COUNTERS_LABEL: &str = "Recommended Counters";
const NO_TIPS: &str = "No tips available.";

pub fn not_found_reply(name: &str) -> Reply {
    Reply::new("Counter lookup", colors::NOT_FOUND)
        .with_description(&format!("No counter data found for \"{}\".", name.trim()))
}

/// The "counter" query against the loaded counter sheet.
pub struct CounterCommand<'a> {
    table: &'a CounterTable,
}

impl<'a> CounterCommand<'a> {
    pub fn new(table: &'a CounterTable) -> Self {
        CounterCommand { table }
    }

    pub fn lookup(&self, defender: &str) -> Result<&'a CounterRecord, AppError> {
        self.table
            .find(defender)
            .ok_or_else(|| AppError::DatasetMissRecord(defender.trim().to_string()))
    }

    pub fn handle(&self, defender: &str) -> Reply {
        match self.lookup(defender) {
            Ok(record) => render(record),
            Err(e) => {
                debug!(error = %e, "counter lookup missed");
                not_found_reply(defender)
            }
        }
    }
}

pub fn render(record: &CounterRecord) -> Reply {
    let title = if record.class.is_empty() {
        record.champion.clone()
    } else {
        format!("{} ({})", record.champion, record.class)
    };
    let mut reply = Reply::new(&title, colors::for_class(&record.class));

    let mut chunks = format_counter_tips(&record.tips);
    // One slot stays free for the counters list.
    if chunks.len() >= MAX_FIELDS {
        warn!(
            champion = %record.champion,
            chunks = chunks.len(),
            "counter tips too long, dropping the tail"
        );
        chunks.truncate(MAX_FIELDS - 1);
    }
    if chunks.is_empty() {
        reply.add_field(TIPS_LABEL, NO_TIPS);
    }
    for (idx, chunk) in chunks.iter().enumerate() {
        let label = if idx == 0 {
            TIPS_LABEL
        } else {
            TIPS_CONTINUED_LABEL
        };
        reply.add_field(label, chunk);
    }

    reply.add_field(COUNTERS_LABEL, &format_counter_list(&record.counters).join("\n"));
    reply
}
