/*!
 * Rule registry.
 *
 * Maps rule names to check objects. Lookup accepts the canonical name or any
 * legacy alias a check declares, so older settings files keep working.
 * Adding a rule means registering it here; the engine never changes.
 */

use std::collections::HashMap;

use log::warn;

use super::brackets::{BracketPosition, EmptyBrackets, ScriptWidth};
use super::glyphs::{
    BlurSymbol, ControlCharacters, ForbiddenMarker, FullwidthDigit, KoreanLeakage, Tilde, WaveDash,
};
use super::length::{LineCount, LineLength};
use super::punctuation::{
    DotEllipsis, DoubleQuadDot, EndPunctuation, MidEllipsis, MissingEndPunctuation,
    QuestionExclamationWidth, TrailingComma, WesternPunctuation,
};
use super::spacing::{HyphenSpace, MusicNote, StrayHyphen, Whitespace};
use super::timing::CueDuration;
use super::Check;

/// Registered checks, in registration order
pub struct RuleRegistry {
    checks: Vec<Box<dyn Check>>,
    // @field: Canonical names and aliases to index in `checks`
    index: HashMap<&'static str, usize>,
}

impl RuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            checks: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create a registry holding every built-in check
    pub fn with_default_checks() -> Self {
        let mut registry = Self::new();

        registry.register(Box::new(LineLength));
        registry.register(Box::new(LineCount));
        registry.register(Box::new(ForbiddenMarker));
        registry.register(Box::new(MidEllipsis));
        registry.register(Box::new(DotEllipsis));
        registry.register(Box::new(DoubleQuadDot));
        registry.register(Box::new(EndPunctuation));
        registry.register(Box::new(MissingEndPunctuation));
        registry.register(Box::new(HyphenSpace::space_expected()));
        registry.register(Box::new(HyphenSpace::no_space()));
        registry.register(Box::new(Whitespace));
        registry.register(Box::new(Tilde));
        registry.register(Box::new(WaveDash));
        registry.register(Box::new(MusicNote));
        registry.register(Box::new(BlurSymbol));
        registry.register(Box::new(FullwidthDigit));
        registry.register(Box::new(BracketPosition));
        registry.register(Box::new(ScriptWidth));
        registry.register(Box::new(QuestionExclamationWidth));
        registry.register(Box::new(KoreanLeakage));
        registry.register(Box::new(ControlCharacters));
        registry.register(Box::new(StrayHyphen));
        registry.register(Box::new(EmptyBrackets));
        registry.register(Box::new(CueDuration));
        registry.register(Box::new(TrailingComma));
        registry.register(Box::new(WesternPunctuation));

        registry
    }

    /// Register a check under its name and aliases
    ///
    /// A check whose name is already taken replaces the earlier one.
    pub fn register(&mut self, check: Box<dyn Check>) {
        let name = check.name();
        let aliases = check.aliases();

        let slot = match self.index.get(name) {
            Some(&existing) if self.checks[existing].name() == name => {
                warn!("Replacing registered rule '{}'", name);
                self.checks[existing] = check;
                existing
            }
            _ => {
                self.checks.push(check);
                self.checks.len() - 1
            }
        };

        self.index.insert(name, slot);
        for &alias in aliases {
            self.index.insert(alias, slot);
        }
    }

    /// Look up a check by canonical name or alias
    pub fn get(&self, name: &str) -> Option<&dyn Check> {
        self.index.get(name.trim()).map(|&i| self.checks[i].as_ref())
    }

    /// Whether a name or alias is known
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Checks in registration order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Check> {
        self.checks.iter().map(|check| check.as_ref())
    }

    /// Canonical names in registration order
    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(|check| check.name()).collect()
    }

    /// Number of registered checks
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Whether no check is registered
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_default_checks()
    }
}
