//! compare command - Three-way comparison of two labels

use std::cmp::Ordering;
use std::process::ExitCode;

use anyhow::Result;

use crate::cli::args::FoldArg;
use crate::cli::Context;
use crate::core::compare::NaturalOrder;
use crate::ui::output;

/// Compare `left` with `right` and print the outcome.
pub fn compare(
    ctx: &Context,
    left: &str,
    right: &str,
    fold: Option<FoldArg>,
) -> Result<ExitCode> {
    let folding = match fold {
        Some(arg) => arg.into(),
        None => ctx.load_config()?.fold(),
    };
    output::debug(format!("folding: {}", folding), ctx.verbosity());

    let ordering = NaturalOrder::new(folding).compare(left, right);
    println!("{}", ordering_name(ordering));
    Ok(ExitCode::SUCCESS)
}

fn ordering_name(ordering: Ordering) -> &'static str {
    match ordering {
        Ordering::Less => "less",
        Ordering::Equal => "equal",
        Ordering::Greater => "greater",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert_eq!(ordering_name(Ordering::Less), "less");
        assert_eq!(ordering_name(Ordering::Equal), "equal");
        assert_eq!(ordering_name(Ordering::Greater), "greater");
    }
}
