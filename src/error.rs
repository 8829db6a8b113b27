use std::{error::Error, fmt};

pub(crate) trait FormatterExt {
    /// Writes `e` followed by its indented `source()` chain.
    fn write_error_chain(&mut self, e: &dyn Error) -> fmt::Result;
}

impl FormatterExt for fmt::Formatter<'_> {
    fn write_error_chain(&mut self, e: &dyn Error) -> fmt::Result {
        writeln!(self, "{e}")?;
        let mut cause = e.source();
        let mut depth = 1;

        while let Some(err) = cause {
            writeln!(self, "{:>width$}+ {err}", "", width = depth * 2)?;
            cause = err.source();
            depth += 1;
        }
        Ok(())
    }
}
