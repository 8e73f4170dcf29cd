use crate::backend::BackendIdentity;
use crate::error::ParleyError;
use std::io::{self, Write};

/// Interactive "query another backend?" prompt shown after a comparison.
pub struct UserPrompter {
    use_colors: bool,
}

impl UserPrompter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Offer the unused catalog entries. Returns the chosen backend id, or
    /// `None` on decline, empty input or EOF.
    pub fn prompt_additional_backend(
        &self,
        unused: &[BackendIdentity],
    ) -> Result<Option<String>, ParleyError> {
        if unused.is_empty() {
            return Ok(None);
        }

        self.display_choices(unused)?;

        let input = self.read_line()?;
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n") || trimmed.eq_ignore_ascii_case("no") {
            return Ok(None);
        }

        // Accept either a list number or a backend id.
        if let Ok(index) = trimmed.parse::<usize>() {
            if index >= 1 && index <= unused.len() {
                return Ok(Some(unused[index - 1].id.clone()));
            }
            return Ok(None);
        }

        Ok(Some(trimmed.to_string()))
    }

    fn display_choices(&self, unused: &[BackendIdentity]) -> Result<(), ParleyError> {
        let (color_start, color_end) = if self.use_colors {
            ("\x1b[1m\x1b[36m", "\x1b[0m")
        } else {
            ("", "")
        };

        println!("\n{color_start}Query another backend?{color_end}");
        for (i, identity) in unused.iter().enumerate() {
            println!(
                "  {}. {} ({}, {})",
                i + 1,
                identity.display_name,
                identity.id,
                identity.tier.as_str()
            );
        }
        print!("Pick a number or id, or press Enter to finish: ");
        io::stdout().flush()?;
        Ok(())
    }

    fn read_line(&self) -> Result<String, ParleyError> {
        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => Ok(String::new()), // EOF counts as a decline
            Ok(_) => Ok(input),
            Err(e) => Err(ParleyError::IoError(e)),
        }
    }
}
