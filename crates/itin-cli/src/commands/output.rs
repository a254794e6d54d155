//! Rendering of parsed records as JSON, CSV or a plain text summary.

use chrono::NaiveDateTime;

use itin_core::{Field, Money, PreviewItem, PreviewRecord};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

/// One record flattened to the columns every kind shares.
struct Row {
    kind: &'static str,
    vendor: &'static str,
    title: String,
    from: String,
    to: String,
    start: String,
    end: String,
    confirmation: String,
    amount: String,
    currency: String,
    needs_review: String,
}

impl Row {
    fn new(item: &PreviewItem) -> Self {
        let needs_review = item.needs_review.join(" ");
        match &item.record {
            PreviewRecord::Flight(f) => Row {
                kind: "flight",
                vendor: f.dialect.vendor(),
                title: join_nonempty(&[text(&f.airline), text(&f.flight_number)]),
                from: text(&f.origin),
                to: text(&f.destination),
                start: stamp(&f.departure),
                end: stamp(&f.arrival),
                confirmation: text(&f.confirmation_code),
                amount: amount(&f.cost),
                currency: currency(&f.cost),
                needs_review,
            },
            PreviewRecord::Lodging(l) => Row {
                kind: "lodging",
                vendor: l.dialect.vendor(),
                title: text(&l.name),
                from: text(&l.address),
                to: String::new(),
                start: stamp(&l.check_in),
                end: stamp(&l.check_out),
                confirmation: text(&l.confirmation_code),
                amount: amount(&l.cost),
                currency: currency(&l.cost),
                needs_review,
            },
            PreviewRecord::GroundTransport(g) => Row {
                kind: g.mode.as_str(),
                vendor: g.dialect.vendor(),
                title: join_nonempty(&[text(&g.operator), text(&g.service_number)]),
                from: text(&g.origin),
                to: text(&g.destination),
                start: stamp(&g.departure),
                end: stamp(&g.arrival),
                confirmation: text(&g.confirmation_code),
                amount: amount(&g.cost),
                currency: currency(&g.cost),
                needs_review,
            },
            PreviewRecord::CarRental(c) => Row {
                kind: "car",
                vendor: c.dialect.vendor(),
                title: text(&c.company),
                from: text(&c.pickup_location),
                to: text(&c.dropoff_location),
                start: stamp(&c.pickup),
                end: stamp(&c.dropoff),
                confirmation: text(&c.confirmation_code),
                amount: amount(&c.cost),
                currency: currency(&c.cost),
                needs_review,
            },
        }
    }
}

fn text(field: &Field<String>) -> String {
    field.value().cloned().unwrap_or_default()
}

fn stamp(field: &Field<NaiveDateTime>) -> String {
    field
        .value()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

fn amount(field: &Field<Money>) -> String {
    field.value().map(|m| m.amount.to_string()).unwrap_or_default()
}

fn currency(field: &Field<Money>) -> String {
    field.value().map(|m| m.currency.clone()).unwrap_or_default()
}

fn join_nonempty(parts: &[String]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_items(items: &[PreviewItem], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
        OutputFormat::Csv => format_csv(items),
        OutputFormat::Text => Ok(format_text(items)),
    }
}

fn format_csv(items: &[PreviewItem]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "kind",
        "vendor",
        "title",
        "from",
        "to",
        "start",
        "end",
        "confirmation",
        "amount",
        "currency",
        "needs_review",
    ])?;

    for item in items {
        let row = Row::new(item);
        wtr.write_record([
            row.kind,
            row.vendor,
            &row.title,
            &row.from,
            &row.to,
            &row.start,
            &row.end,
            &row.confirmation,
            &row.amount,
            &row.currency,
            &row.needs_review,
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(items: &[PreviewItem]) -> String {
    let mut output = String::new();

    for (i, item) in items.iter().enumerate() {
        let row = Row::new(item);
        if i > 0 {
            output.push('\n');
        }

        output.push_str(&format!("[{}] {} ({})\n", i + 1, row.kind, row.vendor));
        if !row.title.is_empty() {
            output.push_str(&format!("  {}\n", row.title));
        }
        if !row.from.is_empty() || !row.to.is_empty() {
            if row.to.is_empty() {
                output.push_str(&format!("  {}\n", row.from));
            } else {
                output.push_str(&format!("  {} -> {}\n", row.from, row.to));
            }
        }
        output.push_str(&format!("  {} -> {}\n", or_dash(&row.start), or_dash(&row.end)));
        if !row.confirmation.is_empty() {
            output.push_str(&format!("  Confirmation: {}\n", row.confirmation));
        }
        if !row.amount.is_empty() {
            output.push_str(&format!("  Cost: {} {}\n", row.amount, row.currency));
        }
        if !row.needs_review.is_empty() {
            output.push_str(&format!("  Check: {}\n", row.needs_review));
        }
    }

    output
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "?" } else { value }
}
