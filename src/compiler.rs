//! Template compiler.
//!
//! Two grammars share one [Verb] table:
//!
//! * [Grammar::Short]: `%` followed by a single character, e.g. `%D %T [%L] %f:%s %M`.
//! * [Grammar::Named]: `%{Name}` or `%{Name arg}`, e.g. `%{Date} %{Time} %{SEV} %{Message}`.
//!
//! Compiling never fails. Unknown verbs and stray `%` are kept as literal text, and `%%`
//! turns into a single `%` in both grammars.

use lazy_static::lazy_static;
use regex::Regex;

use crate::color::color_code;
use crate::verb::{Verb, LOCATION_MASK};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// `%X`
    Short,
    /// `%{Name arg}`
    Named,
}

impl Grammar {
    /// Named when the template contains `%{`, otherwise short.
    pub fn detect(template: &str) -> Self {
        if template.contains("%{") {
            Grammar::Named
        } else {
            Grammar::Short
        }
    }
}

lazy_static! {
    static ref NAMED_RE: Regex =
        Regex::new(r"%%|%\{([A-Za-z]+)(?:\s(.*?[^\\]))?\}").expect("regex pattern valid");
}

/// The instruction sequence of a template.
///
/// `parts` holds one [Verb] per segment, [Verb::Literal] entries consume `strings` in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFormat {
    template: String,
    grammar: Grammar,
    pub(crate) strings: Vec<String>,
    pub(crate) parts: Vec<Verb>,
    flags: u32,
}

impl CompiledFormat {
    pub fn compile(template: &str, grammar: Grammar) -> Self {
        match grammar {
            Grammar::Short => compile_short(template),
            Grammar::Named => compile_named(template),
        }
    }

    fn empty(template: &str, grammar: Grammar) -> Self {
        Self { template: template.to_string(), grammar, strings: Vec::new(), parts: Vec::new(), flags: 0 }
    }

    #[inline]
    fn flush(&mut self, raw: &mut String) {
        if !raw.is_empty() {
            self.strings.push(std::mem::take(raw));
            self.parts.push(Verb::Literal);
        }
    }

    #[inline]
    fn push_verb(&mut self, verb: Verb) {
        self.flags |= verb.bit();
        self.parts.push(verb);
    }

    /// Whether the record needs file / line / function filled in.
    #[inline(always)]
    pub fn should_capture_location(&self) -> bool {
        self.flags & LOCATION_MASK != 0
    }

    /// OR of every verb compiled in.
    #[inline(always)]
    pub fn flags(&self) -> u32 {
        self.flags
    }

    #[inline]
    pub fn uses(&self, verb: Verb) -> bool {
        self.flags & verb.bit() != 0
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn grammar(&self) -> Grammar {
        self.grammar
    }

    /// Number of segments, literal runs included.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Compile a `%X` template.
pub fn compile_short(template: &str) -> CompiledFormat {
    let mut f = CompiledFormat::empty(template, Grammar::Short);
    let mut raw = String::new();
    let mut chars = template.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            raw.push(c);
            continue;
        }
        match chars.next() {
            None | Some('%') => raw.push('%'),
            Some(c) => match Verb::from_short(c) {
                Some(verb) => {
                    f.flush(&mut raw);
                    f.push_verb(verb);
                }
                None => {
                    raw.push('%');
                    raw.push(c);
                }
            },
        }
    }
    f.flush(&mut raw);
    f
}

/// Compile a `%{Name arg}` template.
///
/// `Color` is resolved here and spliced into the literal text, it never reaches the renderer.
pub fn compile_named(template: &str) -> CompiledFormat {
    let mut f = CompiledFormat::empty(template, Grammar::Named);
    let mut raw = String::new();
    let mut prev = 0;
    for caps in NAMED_RE.captures_iter(template) {
        let Some(m) = caps.get(0) else { continue };
        raw.push_str(&template[prev..m.start()]);
        prev = m.end();
        let Some(name) = caps.get(1) else {
            // %%
            raw.push('%');
            continue;
        };
        match Verb::from_name(name.as_str()) {
            Some(Verb::Color) => {
                let arg = caps.get(2).map(|a| a.as_str()).unwrap_or("");
                raw.push_str(&color_code(arg));
            }
            Some(verb) => {
                f.flush(&mut raw);
                f.push_verb(verb);
            }
            None => raw.push_str(m.as_str()),
        }
    }
    raw.push_str(&template[prev..]);
    f.flush(&mut raw);
    f
}
