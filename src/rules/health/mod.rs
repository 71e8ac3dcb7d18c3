//! Built-in health assistant catalog.

pub(crate) mod rules;

#[cfg(test)]
mod tests;
