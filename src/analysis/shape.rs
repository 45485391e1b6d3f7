//! Fragment shapes and their boundary rules.
//!
//! A shape is described by one row of [`SHAPE_RULES`]: a *core* pattern that
//! determines the extracted fragment, and an optional *continuation*
//! lookahead. A shape fires on the head of an encoding when its core covers
//! the whole remaining encoding (terminal trigger) or when the continuation
//! matches right after the core (continuation trigger). The lookahead is
//! never part of the fragment.
//!
//! | Shape | Core       | Continuation        |
//! |-------|------------|---------------------|
//! | CVC   | `c+ v+ c`  | `c+`                |
//! | CV    | `c+ v+`    | `c v`               |
//! | C     | `c+`       | none                |
//! | VC    | `v+ c`     | `c+`                |
//! | V     | `v+`       | `c v`               |
//!
//! Shapes are tried in [`SHAPE_PRIORITY`] order and the first one that fires
//! wins. Together the rows cover every non-empty encoding.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::alphabet::LetterClass;

/// One of the five fragment classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Shape {
    Cvc,
    Cv,
    C,
    Vc,
    V,
}

/// Order in which shapes are attempted.
pub const SHAPE_PRIORITY: [Shape; 5] = [Shape::Cvc, Shape::Cv, Shape::C, Shape::Vc, Shape::V];

/// Which boundary condition made a shape fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    /// The core consumed the entire remaining encoding.
    Terminal,
    /// The core is followed by context opening a further syllable.
    Continuation,
}

/// A successful match of a shape at the head of an encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapeMatch {
    pub shape: Shape,
    /// Number of letters covered by the fragment.
    pub len: usize,
    pub trigger: Trigger,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Repeat {
    One,
    OneOrMore,
}

/// A run of letters of one class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Step {
    class: LetterClass,
    repeat: Repeat,
}

const fn one(class: LetterClass) -> Step {
    Step {
        class,
        repeat: Repeat::One,
    }
}

const fn many(class: LetterClass) -> Step {
    Step {
        class,
        repeat: Repeat::OneOrMore,
    }
}

const C: LetterClass = LetterClass::Consonant;
const V: LetterClass = LetterClass::Vowel;

/// Extraction and trigger rule of a single shape.
#[derive(Debug)]
pub struct ShapeRule {
    pub shape: Shape,
    core: &'static [Step],
    continuation: Option<&'static [Step]>,
}

const CVC_CORE: &[Step] = &[many(C), many(V), one(C)];
const CV_CORE: &[Step] = &[many(C), many(V)];
const C_CORE: &[Step] = &[many(C)];
const VC_CORE: &[Step] = &[many(V), one(C)];
const V_CORE: &[Step] = &[many(V)];

// Lookaheads: a consonant cluster, or a consonant opening a new syllable.
const CLUSTER: &[Step] = &[many(C)];
const OPEN_SYLLABLE: &[Step] = &[one(C), one(V)];

/// Rule table, indexed in [`SHAPE_PRIORITY`] order.
pub static SHAPE_RULES: [ShapeRule; 5] = [
    ShapeRule {
        shape: Shape::Cvc,
        core: CVC_CORE,
        continuation: Some(CLUSTER),
    },
    ShapeRule {
        shape: Shape::Cv,
        core: CV_CORE,
        continuation: Some(OPEN_SYLLABLE),
    },
    ShapeRule {
        shape: Shape::C,
        core: C_CORE,
        continuation: None,
    },
    ShapeRule {
        shape: Shape::Vc,
        core: VC_CORE,
        continuation: Some(CLUSTER),
    },
    ShapeRule {
        shape: Shape::V,
        core: V_CORE,
        continuation: Some(OPEN_SYLLABLE),
    },
];

impl Shape {
    /// The rule row for this shape.
    pub fn rule(self) -> &'static ShapeRule {
        match self {
            Shape::Cvc => &SHAPE_RULES[0],
            Shape::Cv => &SHAPE_RULES[1],
            Shape::C => &SHAPE_RULES[2],
            Shape::Vc => &SHAPE_RULES[3],
            Shape::V => &SHAPE_RULES[4],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Shape::Cvc => "CVC",
            Shape::Cv => "CV",
            Shape::C => "C",
            Shape::Vc => "VC",
            Shape::V => "V",
        }
    }

    /// Test this shape against the head of `encoding`.
    pub fn match_head(self, encoding: &[LetterClass]) -> Option<ShapeMatch> {
        self.rule().match_head(encoding)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ShapeRule {
    /// Test the rule against the head of `encoding`.
    pub fn match_head(&self, encoding: &[LetterClass]) -> Option<ShapeMatch> {
        let len = match_steps(self.core, encoding)?;

        let trigger = if len == encoding.len() {
            Trigger::Terminal
        } else {
            let lookahead = self.continuation?;
            match_steps(lookahead, &encoding[len..])?;
            Trigger::Continuation
        };

        Some(ShapeMatch {
            shape: self.shape,
            len,
            trigger,
        })
    }
}

/// First shape in priority order that fires on the head of `encoding`.
pub fn match_first(encoding: &[LetterClass]) -> Option<ShapeMatch> {
    SHAPE_PRIORITY
        .iter()
        .find_map(|shape| shape.match_head(encoding))
}

/// Anchored, greedy match of `steps` against the head of `input`.
///
/// Adjacent steps never share a class, so greedy runs need no backtracking.
fn match_steps(steps: &[Step], input: &[LetterClass]) -> Option<usize> {
    let mut pos = 0;
    for step in steps {
        let run = input[pos..]
            .iter()
            .take_while(|&&class| class == step.class)
            .count();
        if run == 0 {
            return None;
        }
        pos += match step.repeat {
            Repeat::One => 1,
            Repeat::OneOrMore => run,
        };
    }
    Some(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(pattern: &str) -> Vec<LetterClass> {
        pattern
            .chars()
            .map(|c| if c == 'c' { C } else { V })
            .collect()
    }

    #[test]
    fn test_rule_table_follows_priority() {
        for (rule, shape) in SHAPE_RULES.iter().zip(SHAPE_PRIORITY) {
            assert_eq!(rule.shape, shape);
            assert_eq!(shape.rule().shape, shape);
        }
    }

    #[test]
    fn test_cvc_triggers() {
        let m = Shape::Cvc.match_head(&enc("ccvvc")).unwrap();
        assert_eq!((m.len, m.trigger), (5, Trigger::Terminal));

        let m = Shape::Cvc.match_head(&enc("cvccv")).unwrap();
        assert_eq!((m.len, m.trigger), (3, Trigger::Continuation));

        assert!(Shape::Cvc.match_head(&enc("cvcv")).is_none());
        assert!(Shape::Cvc.match_head(&enc("cv")).is_none());
        assert!(Shape::Cvc.match_head(&enc("vcc")).is_none());
    }

    #[test]
    fn test_cv_triggers() {
        let m = Shape::Cv.match_head(&enc("cvv")).unwrap();
        assert_eq!((m.len, m.trigger), (3, Trigger::Terminal));

        let m = Shape::Cv.match_head(&enc("cvcv")).unwrap();
        assert_eq!((m.len, m.trigger), (2, Trigger::Continuation));

        assert!(Shape::Cv.match_head(&enc("cvc")).is_none());
        assert!(Shape::Cv.match_head(&enc("cvcc")).is_none());
    }

    #[test]
    fn test_c_is_terminal_only() {
        let m = Shape::C.match_head(&enc("ccc")).unwrap();
        assert_eq!((m.len, m.trigger), (3, Trigger::Terminal));

        assert!(Shape::C.match_head(&enc("ccv")).is_none());
        assert!(Shape::C.match_head(&enc("v")).is_none());
    }

    #[test]
    fn test_vc_triggers() {
        let m = Shape::Vc.match_head(&enc("vvc")).unwrap();
        assert_eq!((m.len, m.trigger), (3, Trigger::Terminal));

        let m = Shape::Vc.match_head(&enc("vvcc")).unwrap();
        assert_eq!((m.len, m.trigger), (3, Trigger::Continuation));

        assert!(Shape::Vc.match_head(&enc("vcv")).is_none());
    }

    #[test]
    fn test_v_triggers() {
        let m = Shape::V.match_head(&enc("vv")).unwrap();
        assert_eq!((m.len, m.trigger), (2, Trigger::Terminal));

        let m = Shape::V.match_head(&enc("vcv")).unwrap();
        assert_eq!((m.len, m.trigger), (1, Trigger::Continuation));

        assert!(Shape::V.match_head(&enc("vcc")).is_none());
    }

    #[test]
    fn test_cvc_has_priority_over_cv() {
        // The head also starts with a CV-shaped prefix; the closed syllable
        // is taken.
        let m = match_first(&enc("cvcccv")).unwrap();
        assert_eq!(m.shape, Shape::Cvc);
        assert_eq!(m.len, 3);

        let m = match_first(&enc("cvc")).unwrap();
        assert_eq!(m.shape, Shape::Cvc);
    }

    #[test]
    fn test_rules_are_exhaustive() {
        // Every encoding up to length 8 is matched by some shape and the
        // match consumes at least one letter.
        for len in 1..=8u32 {
            for bits in 0..(1u32 << len) {
                let encoding: Vec<LetterClass> = (0..len)
                    .map(|i| if bits & (1 << i) == 0 { C } else { V })
                    .collect();
                let m = match_first(&encoding)
                    .unwrap_or_else(|| panic!("no shape for {encoding:?}"));
                assert!(m.len >= 1 && m.len <= encoding.len());
            }
        }
    }

    #[test]
    fn test_shape_display() {
        let names: Vec<String> = SHAPE_PRIORITY.iter().map(Shape::to_string).collect();
        assert_eq!(names, vec!["CVC", "CV", "C", "VC", "V"]);
    }
}
