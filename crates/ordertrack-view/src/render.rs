//! Plain-text rendering of a [`Screen`] for terminals.

use std::fmt;

use crate::present::{Alert, OrderCard, Screen};

const PROGRESS_WIDTH: usize = 20;

/// Plain text, one block per visible section.
impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.subtitle)?;
        writeln!(f)?;

        let input = if self.form.input.is_empty() {
            self.form.placeholder
        } else {
            self.form.input.as_str()
        };
        let spinner = if self.form.disabled { "* " } else { "" };
        writeln!(f, "[ {input} ] [{spinner}{}]", self.form.button_label)?;

        match &self.alert {
            Some(Alert::Error(message)) => writeln!(f, "! {message}")?,
            Some(Alert::Info(message)) => writeln!(f, "i {message}")?,
            None => {}
        }

        if let Some(card) = &self.card {
            writeln!(f)?;
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

impl fmt::Display for OrderCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}  [{}]", self.heading, self.badge.label)?;

        if let Some(notice) = &self.delay_notice {
            writeln!(f, "  ! {}", notice.title)?;
            writeln!(f, "    {}", notice.message)?;
        }

        if let Some(location) = &self.current_location {
            writeln!(f, "  Current Location: {location}")?;
        }

        if let Some(progress) = self.progress {
            let filled = usize::from(progress).min(100) * PROGRESS_WIDTH / 100;
            writeln!(
                f,
                "  Progress: [{}{}] {progress}%",
                "#".repeat(filled),
                "-".repeat(PROGRESS_WIDTH.saturating_sub(filled))
            )?;
        }

        writeln!(f, "  Estimated Delivery: {}", self.estimated_delivery)?;
        if let Some(delivered) = &self.delivered_on {
            writeln!(f, "  Delivered On: {delivered}")?;
        }

        if let Some(timeline) = &self.timeline {
            writeln!(f)?;
            writeln!(f, "  Tracking History")?;
            for item in timeline {
                writeln!(f, "  - {}", item.status)?;
                if let Some(location) = &item.location {
                    writeln!(f, "    {location}")?;
                }
                if let Some(description) = &item.description {
                    writeln!(f, "    {description}")?;
                }
                writeln!(f, "    {}", item.date)?;
            }
        }
        Ok(())
    }
}
