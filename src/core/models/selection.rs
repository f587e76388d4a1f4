//! User selection state
//!
//! The selection is owned by the host, not by the pricing engine. Every map
//! uses key presence as its signal: a manual override of `0` is stored as
//! `Some(0)` and is different from having no override at all.

use super::catalog::Catalog;
use crate::core::error::SelectionError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::str::FromStr;

/// Default upper bound for any quantity
pub const DEFAULT_MAX_QUANTITY: u32 = 50_000;

/// Largest manual amount a selection may carry
pub const MAX_MANUAL_AMOUNT: Decimal = rust_decimal_macros::dec!(1_000_000_000_000);

/// Nested `phase id -> line id -> value` map
pub type LineMap<T> = BTreeMap<String, BTreeMap<String, T>>;

/// Everything the user has chosen for one quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Global unit count (teachers/professors)
    pub quantity: u32,

    /// Phases in scope, by id
    #[serde(default)]
    pub selected_phase_ids: BTreeSet<String>,

    /// Extra feature id -> how many of it
    #[serde(default)]
    pub extra_feature_quantities: BTreeMap<String, u32>,

    /// Manual amounts replacing a line's default
    #[serde(default)]
    pub manual_overrides: LineMap<Decimal>,

    /// Per-line quantities replacing the global quantity
    #[serde(default)]
    pub line_quantity_overrides: LineMap<u32>,
}

impl Default for Selection {
    /// 100 units with the first roadmap phase selected
    fn default() -> Self {
        Self {
            quantity: 100,
            selected_phase_ids: BTreeSet::from(["fase0".to_string()]),
            extra_feature_quantities: BTreeMap::new(),
            manual_overrides: BTreeMap::new(),
            line_quantity_overrides: BTreeMap::new(),
        }
    }
}

impl Selection {
    /// Create a selection with the given quantity and nothing else selected
    #[must_use]
    pub fn with_quantity(quantity: u32) -> Self {
        Self {
            quantity,
            selected_phase_ids: BTreeSet::new(),
            ..Self::default()
        }
    }

    /// Load a selection from a JSON (`.json`) or TOML (any other extension) file
    ///
    /// # Errors
    /// Returns `SelectionError::File` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, SelectionError> {
        let file_error = |message: String| SelectionError::File {
            path: path.to_path_buf(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| file_error(e.to_string()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str(&content).map_err(|e| file_error(e.to_string()))
        } else {
            toml::from_str(&content).map_err(|e| file_error(e.to_string()))
        }
    }

    /// Check the selection's numbers before pricing it
    ///
    /// The global quantity must be in `1..=max_quantity`, line quantities may
    /// not exceed `max_quantity`, and manual amounts must be in
    /// `0..=MAX_MANUAL_AMOUNT`.
    ///
    /// # Errors
    /// Returns `SelectionError::QuantityOutOfRange` for a bad global or line
    /// quantity and `SelectionError::ManualAmountOutOfRange` for a bad manual amount.
    pub fn validate(&self, max_quantity: u32) -> Result<(), SelectionError> {
        if self.quantity == 0 || self.quantity > max_quantity {
            return Err(SelectionError::QuantityOutOfRange {
                quantity: self.quantity,
                max: max_quantity,
            });
        }

        if let Some(&quantity) = self
            .line_quantity_overrides
            .values()
            .flat_map(BTreeMap::values)
            .find(|&&q| q > max_quantity)
        {
            return Err(SelectionError::QuantityOutOfRange {
                quantity,
                max: max_quantity,
            });
        }

        for (phase_id, lines) in &self.manual_overrides {
            for (line_id, &amount) in lines {
                if amount < Decimal::ZERO || amount > MAX_MANUAL_AMOUNT {
                    return Err(SelectionError::ManualAmountOutOfRange {
                        phase_id: phase_id.clone(),
                        line_id: line_id.clone(),
                        amount,
                        max: MAX_MANUAL_AMOUNT,
                    });
                }
            }
        }
        Ok(())
    }

    /// Set the global quantity, clamped to `1..=max_quantity`
    pub fn set_quantity(&mut self, quantity: u32, max_quantity: u32) {
        self.quantity = quantity.clamp(1, max_quantity.max(1));
    }

    /// Select a phase if it is not selected, otherwise deselect it.
    ///
    /// Overrides recorded for the phase are kept either way.
    pub fn toggle_phase(&mut self, phase_id: &str) {
        if !self.selected_phase_ids.remove(phase_id) {
            self.selected_phase_ids.insert(phase_id.to_string());
        }
    }

    /// Whether a phase is in scope
    #[must_use]
    pub fn is_phase_selected(&self, phase_id: &str) -> bool {
        self.selected_phase_ids.contains(phase_id)
    }

    /// Select every phase of the catalog
    pub fn select_all_phases(&mut self, catalog: &Catalog) {
        self.selected_phase_ids = catalog.phase_ids().map(str::to_string).collect();
    }

    /// Deselect every phase
    pub fn clear_phases(&mut self) {
        self.selected_phase_ids.clear();
    }

    /// Set how many of an extra feature to add; `0` keeps the key but adds nothing
    pub fn set_extra_feature(&mut self, feature_id: &str, quantity: u32) {
        self.extra_feature_quantities
            .insert(feature_id.to_string(), quantity);
    }

    /// Record a manual amount for a line, including an explicit zero
    pub fn set_manual_override(&mut self, phase_id: &str, line_id: &str, amount: Decimal) {
        self.manual_overrides
            .entry(phase_id.to_string())
            .or_default()
            .insert(line_id.to_string(), amount);
    }

    /// Forget a manual amount so the line falls back to its default
    pub fn clear_manual_override(&mut self, phase_id: &str, line_id: &str) {
        remove_line_entry(&mut self.manual_overrides, phase_id, line_id);
    }

    /// Manual amount recorded for a line, if any
    #[must_use]
    pub fn manual_override(&self, phase_id: &str, line_id: &str) -> Option<Decimal> {
        self.manual_overrides
            .get(phase_id)
            .and_then(|lines| lines.get(line_id))
            .copied()
    }

    /// Give a line its own quantity, clamped to `1..=max_quantity`
    pub fn set_line_quantity(
        &mut self,
        phase_id: &str,
        line_id: &str,
        quantity: u32,
        max_quantity: u32,
    ) {
        self.line_quantity_overrides
            .entry(phase_id.to_string())
            .or_default()
            .insert(line_id.to_string(), quantity.clamp(1, max_quantity.max(1)));
    }

    /// Make a line follow the global quantity again
    pub fn clear_line_quantity(&mut self, phase_id: &str, line_id: &str) {
        remove_line_entry(&mut self.line_quantity_overrides, phase_id, line_id);
    }

    /// Quantity a line is priced at: its own override, else the global quantity
    #[must_use]
    pub fn line_quantity(&self, phase_id: &str, line_id: &str) -> u32 {
        self.line_quantity_overrides
            .get(phase_id)
            .and_then(|lines| lines.get(line_id))
            .copied()
            .unwrap_or(self.quantity)
    }
}

fn remove_line_entry<T>(map: &mut LineMap<T>, phase_id: &str, line_id: &str) {
    if let Some(lines) = map.get_mut(phase_id) {
        lines.remove(line_id);
        if lines.is_empty() {
            map.remove(phase_id);
        }
    }
}

/// Parse `KEY=VALUE`
///
/// # Errors
/// Returns an error if there is no `=` or the value does not parse as `T`.
pub fn parse_assignment<T: FromStr>(input: &str) -> Result<(String, T), SelectionError> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| SelectionError::MalformedAssignment(input.to_string()))?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() {
        return Err(SelectionError::MalformedAssignment(input.to_string()));
    }
    let parsed = value.parse::<T>().map_err(|_| SelectionError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })?;
    Ok((key.to_string(), parsed))
}

/// Parse `PHASE.LINE=VALUE`
///
/// The phase id is everything before the first `.`, so line ids may contain dots.
///
/// # Errors
/// Returns an error if the assignment or the `PHASE.LINE` key is malformed.
pub fn parse_line_assignment<T: FromStr>(
    input: &str,
) -> Result<(String, String, T), SelectionError> {
    let (key, value) = parse_assignment::<T>(input)?;
    match key.split_once('.') {
        Some((phase, line)) if !phase.is_empty() && !line.is_empty() => {
            Ok((phase.to_string(), line.to_string(), value))
        }
        _ => Err(SelectionError::MalformedLineKey(key)),
    }
}
