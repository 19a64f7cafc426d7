use anyhow::{anyhow, Context, Result};
use colored::*;
use enigo::{Axis, Enigo, Mouse, Settings};

use crate::gesture::ScrollDirection;

/// Scroll wheel actuator. Emitting a scroll is best effort: the OS may
/// refuse synthetic input, in which case we log once per failure and move on.
pub struct ScrollWheel {
    enigo: Option<Enigo>,
    lines: i32,
}

impl ScrollWheel {
    pub fn new(lines: i32) -> Result<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| anyhow!("{e}"))
            .context("Failed to connect to the OS input layer")?;
        Ok(Self {
            enigo: Some(enigo),
            lines,
        })
    }

    /// A wheel that prints instead of scrolling (--no-scroll).
    pub fn disabled(lines: i32) -> Self {
        Self { enigo: None, lines }
    }

    pub fn emit(&mut self, direction: ScrollDirection) {
        match direction {
            ScrollDirection::Up => println!("{}", "Scrolling Up".cyan()),
            ScrollDirection::Down => println!("{}", "Scrolling Down".cyan()),
        }

        let Some(enigo) = self.enigo.as_mut() else {
            return;
        };

        // enigo's vertical axis is positive-down; our Up means wheel up.
        let length = match direction {
            ScrollDirection::Up => -self.lines,
            ScrollDirection::Down => self.lines,
        };

        if let Err(e) = enigo.scroll(length, Axis::Vertical) {
            println!("{}", format!("Scroll failed: {}", e).red());
        }
    }
}
