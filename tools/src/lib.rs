//! Command-line helpers for qrwallet URL tokens.
//!
//! This crate backs the `qrwallet-tools` binary:
//!
//! - Encode a list of payloads into a wallet URL or bare token
//! - Decode a wallet URL back into its entries
//! - Report the size of every pipeline stage for a token
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Strict by default** - Decoding reports the failing stage instead of an empty wallet.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use history::{EntrySchema, HistoryEntry};
use serde::Serialize;
use url::Url;
use urlstate::{DecodedToken, Location, TokenReport, UrlStateManager, WalletConfig};

/// One entry as printed by `decode --format json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView<'a> {
    /// Position in the wallet.
    pub index: usize,
    /// The QR payload text.
    pub data: &'a str,
    /// Display timestamp, omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<&'a str>,
}

/// Reads a JSON config file, or returns the default config.
pub fn load_config(path: Option<&Path>) -> Result<WalletConfig> {
    let Some(path) = path else {
        return Ok(WalletConfig::default());
    };
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    WalletConfig::from_json(&contents).with_context(|| format!("parse config {}", path.display()))
}

/// Extracts the token from a wallet URL, a `?token` or a bare token.
///
/// A URL without a query string yields the empty token.
#[must_use]
pub fn token_from_input(input: &str) -> String {
    let input = input.trim();
    match Url::parse(input) {
        Ok(url) if url.has_host() => Location::query(&url).unwrap_or_default().to_string(),
        _ => input.strip_prefix('?').unwrap_or(input).to_string(),
    }
}

/// Builds entries from command-line payloads, skipping blank ones and duplicates.
///
/// Entries are stamped with the current local time when `schema` records one.
#[must_use]
pub fn entries_from_payloads<I, S>(payloads: I, schema: EntrySchema) -> Vec<HistoryEntry>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut entries: Vec<HistoryEntry> = Vec::new();
    for payload in payloads {
        let data = payload.into();
        if data.trim().is_empty() || entries.iter().any(|e| e.data == data) {
            continue;
        }
        let entry = if schema.is_timestamped() {
            HistoryEntry::stamped_now(data)
        } else {
            HistoryEntry::plain(data)
        };
        entries.push(entry);
    }
    entries
}

/// Encodes `entries` and either returns the bare token or writes it into `base_url`.
pub fn encode_entries(
    manager: &UrlStateManager,
    entries: &[HistoryEntry],
    base_url: Option<&str>,
) -> Result<String> {
    let Some(base_url) = base_url else {
        return manager.save_to_token(entries).context("encode history");
    };
    let mut url = Url::parse(base_url).with_context(|| format!("parse base url {base_url}"))?;
    manager.save(&mut url, entries).context("encode history")?;
    Ok(url.href())
}

/// Decodes a URL or token, keeping the stage error.
pub fn inspect_input(manager: &UrlStateManager, input: &str) -> Result<DecodedToken> {
    let token = token_from_input(input);
    manager.codec().inspect(&token).context("decode token")
}

/// Returns entries as JSON-ready views.
#[must_use]
pub fn entry_views(entries: &[HistoryEntry]) -> Vec<EntryView<'_>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| EntryView {
            index,
            data: &entry.data,
            timestamp: entry.timestamp.as_deref(),
        })
        .collect()
}

/// Formats entries one per line.
#[must_use]
pub fn format_entries_pretty(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "(empty wallet)".to_string();
    }
    let mut out = String::new();
    for (index, entry) in entries.iter().enumerate() {
        let _ = writeln!(out, "{index:>3}  {entry}");
    }
    out.truncate(out.trim_end().len());
    out
}

/// Formats a [`TokenReport`] as aligned `name: value` lines.
#[must_use]
pub fn format_report_pretty(report: &TokenReport) -> String {
    let ratio = if report.compressed_bytes == 0 {
        0.0
    } else {
        report.inflated_bytes as f64 / report.compressed_bytes as f64
    };
    let mut out = String::new();
    let _ = writeln!(out, "version:          {}", report.version);
    let _ = writeln!(out, "token length:     {}", report.token_len);
    let _ = writeln!(out, "symbols:          {}", report.symbols);
    let _ = writeln!(out, "skipped chars:    {}", report.skipped);
    let _ = writeln!(out, "compressed bytes: {}", report.compressed_bytes);
    let _ = writeln!(out, "inflated bytes:   {}", report.inflated_bytes);
    let _ = writeln!(out, "ratio:            {ratio:.2}");
    let _ = write!(out, "entries:          {}", report.entries);
    out
}
