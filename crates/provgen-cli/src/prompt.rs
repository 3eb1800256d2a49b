use provgen_core::collect::PromptSource;
use provgen_core::schema::ParamSpec;
use provgen_core::Result;
use std::io::{BufRead, Write};

/// Reads parameter values from stdin, one line per prompt. EOF reports the
/// channel as closed so the collector aborts instead of spinning.
#[derive(Debug, Default)]
pub struct StdinPrompter;

impl PromptSource for StdinPrompter {
    fn prompt(&mut self, spec: &ParamSpec) -> Result<Option<String>> {
        print!("{} ", spec.prompt);
        std::io::stdout().flush()?;

        let mut line = String::new();
        let read = std::io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn reject(&mut self, _spec: &ParamSpec, reason: &str) {
        println!("  {reason}");
    }
}
