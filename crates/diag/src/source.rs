use beef::lean::Cow;

/// A borrowed (or owned) source text that diagnostics point into.
#[derive(Clone, Debug)]
pub struct Source<'a> {
  str: Cow<'a, str>,
}

impl<'a> Source<'a> {
  pub fn string(str: impl Into<Cow<'a, str>>) -> Self {
    Source { str: str.into() }
  }

  pub fn str(&self) -> &str {
    self.str.as_ref()
  }
}

impl<'a> From<&'a str> for Source<'a> {
  fn from(value: &'a str) -> Self {
    Source::string(value)
  }
}

impl<'a> From<String> for Source<'a> {
  fn from(value: String) -> Self {
    Source::string(value)
  }
}

impl<'a> From<Cow<'a, str>> for Source<'a> {
  fn from(value: Cow<'a, str>) -> Self {
    Source { str: value }
  }
}
