//! Plain-text rendering of scenarios and examples.

use std::io::{self, Write};

use makearch_scenario::AutomationScenario;

use crate::catalog::Example;
use crate::messages::Messages;

pub fn render_scenario(
    out: &mut dyn Write,
    scenario: &AutomationScenario,
    messages: &Messages,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "=== {} ===", scenario.title)?;
    writeln!(out, "{}", scenario.description)?;

    writeln!(out)?;
    writeln!(out, "{}", messages.modules_heading)?;
    for (i, module) in scenario.modules.iter().enumerate() {
        if module.has_ai {
            writeln!(out, "  {}. {} {}", i + 1, module.name, messages.ai_badge)?;
        } else {
            writeln!(out, "  {}. {}", i + 1, module.name)?;
        }
        writeln!(out, "     {}", module.description)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", messages.ai_heading)?;
    writeln!(out, "  {}", scenario.ai_integration)?;

    writeln!(out)?;
    writeln!(out, "{}", messages.tips_heading)?;
    for tip in &scenario.tips {
        writeln!(out, "  - {}", tip)?;
    }

    Ok(())
}

pub fn render_examples(
    out: &mut dyn Write,
    examples: &[Example],
    messages: &Messages,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", messages.examples_heading)?;
    for (i, example) in examples.iter().enumerate() {
        writeln!(out, "  {}. {} - {}", i + 1, example.title, example.description)?;
    }
    Ok(())
}
