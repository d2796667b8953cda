/*
[INPUT]:  State-provided widget descriptions
[OUTPUT]: Declarative window layout descriptors
[POS]:    Layout model - opaque data handed across the GUI boundary
[UPDATE]: When adding widget kinds
*/

use serde::{Deserialize, Serialize};

/// Declarative description of one window: a title and a grid of widget rows.
///
/// The machine never interprets layouts. It derives them from states and
/// hands them to the backend on open and on re-render, so a layout must be
/// re-derivable from state fields at any time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: String,
    pub rows: Vec<Vec<Widget>>,
}

impl Layout {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
        }
    }

    /// Append one row of widgets, builder style
    pub fn row(mut self, widgets: Vec<Widget>) -> Self {
        self.rows.push(widgets);
        self
    }

    /// First progress widget in the layout, as (percent, visible)
    pub fn progress_indicator(&self) -> Option<(u8, bool)> {
        self.rows.iter().flatten().find_map(|widget| match widget {
            Widget::Progress {
                percent, visible, ..
            } => Some((*percent, *visible)),
            _ => None,
        })
    }
}

/// One widget in a layout row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Widget {
    Text {
        text: String,
    },
    Button {
        label: String,
        /// Event id fired when the button is activated
        event: String,
    },
    Input {
        key: String,
    },
    Progress {
        key: String,
        percent: u8,
        visible: bool,
    },
}

impl Widget {
    pub fn text(text: impl Into<String>) -> Self {
        Widget::Text { text: text.into() }
    }

    pub fn button(label: impl Into<String>, event: impl Into<String>) -> Self {
        Widget::Button {
            label: label.into(),
            event: event.into(),
        }
    }

    pub fn input(key: impl Into<String>) -> Self {
        Widget::Input { key: key.into() }
    }

    pub fn progress(key: impl Into<String>, percent: u8, visible: bool) -> Self {
        Widget::Progress {
            key: key.into(),
            percent,
            visible,
        }
    }
}
