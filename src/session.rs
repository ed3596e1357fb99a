//! One theme decision: gather conditions, select, and describe the result.

use crate::conditions::{self, Conditions, ConditionsSource, HttpConditions};
use crate::config::Config;
use crate::selector::{self, Rule, Selection};
use chrono::NaiveDateTime;
use log::info;

/// Outcome of a decision, with the inputs that led to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub now: NaiveDateTime,
    pub conditions: Conditions,
    pub selection: Selection,
}

impl Decision {
    /// Diagnostic lines: the time, then the moon and weather inputs the
    /// selection actually looked at.
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Time: {}", self.now.format("%H:%M"))];
        let rule = self.selection.rule;

        if let Some(astro) = self.conditions.astro.as_ref().filter(|_| rule != Rule::TimeOfDay) {
            lines.push(format!("Moon: {}", astro.describe()));
        }
        if let Some(weather) = self
            .conditions
            .weather
            .as_ref()
            .filter(|_| matches!(rule, Rule::Weather | Rule::Season))
        {
            lines.push(format!("WX: {}", weather.describe()));
        }
        lines
    }
}

/// Fetch conditions from `source` and pick the theme for `now`.
///
/// Without a source (offline) nothing is fetched and selection uses only
/// the time and the season.
pub fn decide(source: Option<&dyn ConditionsSource>, now: NaiveDateTime) -> Decision {
    let conditions = source.map(conditions::gather).unwrap_or_default();
    let selection = selector::select(
        now,
        conditions.weather.as_ref(),
        conditions.astro.as_ref(),
    );
    info!("Theme {} chosen by {}", selection.theme, selection.rule);

    Decision {
        now,
        conditions,
        selection,
    }
}

/// The live HTTP source for `config`, or none when offline.
pub fn source_for(config: &Config, offline: bool) -> Option<Box<dyn ConditionsSource>> {
    match offline {
        true => None,
        false => Some(Box::new(HttpConditions::new(
            config.city.clone(),
            config.weather.clone(),
            config.astronomy.clone(),
        ))),
    }
}
