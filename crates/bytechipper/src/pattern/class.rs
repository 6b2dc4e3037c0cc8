//! # Character Classes
//!
//! Bracket classes, Perl classes (`\d \s \w`), and Unicode general
//! category escapes (`\p{..}`), evaluated per code point.

use unicode_general_category::{GeneralCategory, get_general_category};

/// A set of Unicode general categories, stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategorySet(u32);

impl CategorySet {
    /// Uppercase letter.
    pub const LU: Self = Self(1 << 0);
    /// Lowercase letter.
    pub const LL: Self = Self(1 << 1);
    /// Titlecase letter.
    pub const LT: Self = Self(1 << 2);
    /// Modifier letter.
    pub const LM: Self = Self(1 << 3);
    /// Other letter.
    pub const LO: Self = Self(1 << 4);
    /// Nonspacing mark.
    pub const MN: Self = Self(1 << 5);
    /// Spacing mark.
    pub const MC: Self = Self(1 << 6);
    /// Enclosing mark.
    pub const ME: Self = Self(1 << 7);
    /// Decimal number.
    pub const ND: Self = Self(1 << 8);
    /// Letter number.
    pub const NL: Self = Self(1 << 9);
    /// Other number.
    pub const NO: Self = Self(1 << 10);
    /// Connector punctuation.
    pub const PC: Self = Self(1 << 11);
    /// Dash punctuation.
    pub const PD: Self = Self(1 << 12);
    /// Open punctuation.
    pub const PS: Self = Self(1 << 13);
    /// Close punctuation.
    pub const PE: Self = Self(1 << 14);
    /// Initial punctuation.
    pub const PI: Self = Self(1 << 15);
    /// Final punctuation.
    pub const PF: Self = Self(1 << 16);
    /// Other punctuation.
    pub const PO: Self = Self(1 << 17);
    /// Math symbol.
    pub const SM: Self = Self(1 << 18);
    /// Currency symbol.
    pub const SC: Self = Self(1 << 19);
    /// Modifier symbol.
    pub const SK: Self = Self(1 << 20);
    /// Other symbol.
    pub const SO: Self = Self(1 << 21);
    /// Space separator.
    pub const ZS: Self = Self(1 << 22);
    /// Line separator.
    pub const ZL: Self = Self(1 << 23);
    /// Paragraph separator.
    pub const ZP: Self = Self(1 << 24);
    /// Control.
    pub const CC: Self = Self(1 << 25);
    /// Format.
    pub const CF: Self = Self(1 << 26);
    /// Surrogate.
    pub const CS: Self = Self(1 << 27);
    /// Private use.
    pub const CO: Self = Self(1 << 28);
    /// Unassigned.
    pub const CN: Self = Self(1 << 29);

    /// Any letter.
    pub const L: Self = Self(0b1_1111);
    /// Cased letter.
    pub const LC: Self = Self(0b111);
    /// Any mark.
    pub const M: Self = Self(0b111 << 5);
    /// Any number.
    pub const N: Self = Self(0b111 << 8);
    /// Any punctuation.
    pub const P: Self = Self(0b111_1111 << 11);
    /// Any symbol.
    pub const S: Self = Self(0b1111 << 18);
    /// Any separator.
    pub const Z: Self = Self(0b111 << 22);
    /// Any "other".
    pub const C: Self = Self(0b1_1111 << 25);

    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Union of two sets.
    pub const fn union(
        self,
        other: Self,
    ) -> Self {
        Self(self.0 | other.0)
    }

    /// Does this set contain every category of `other`?
    pub const fn contains(
        self,
        other: Self,
    ) -> bool {
        self.0 & other.0 == other.0
    }

    /// Does this set contain the category of `c`?
    pub fn contains_char(
        self,
        c: char,
    ) -> bool {
        self.0 & Self::of_char(c).0 != 0
    }

    /// The singleton set holding `c`'s general category.
    pub fn of_char(c: char) -> Self {
        use GeneralCategory::*;
        match get_general_category(c) {
            UppercaseLetter => Self::LU,
            LowercaseLetter => Self::LL,
            TitlecaseLetter => Self::LT,
            ModifierLetter => Self::LM,
            OtherLetter => Self::LO,
            NonspacingMark => Self::MN,
            SpacingMark => Self::MC,
            EnclosingMark => Self::ME,
            DecimalNumber => Self::ND,
            LetterNumber => Self::NL,
            OtherNumber => Self::NO,
            ConnectorPunctuation => Self::PC,
            DashPunctuation => Self::PD,
            OpenPunctuation => Self::PS,
            ClosePunctuation => Self::PE,
            InitialPunctuation => Self::PI,
            FinalPunctuation => Self::PF,
            OtherPunctuation => Self::PO,
            MathSymbol => Self::SM,
            CurrencySymbol => Self::SC,
            ModifierSymbol => Self::SK,
            OtherSymbol => Self::SO,
            SpaceSeparator => Self::ZS,
            LineSeparator => Self::ZL,
            ParagraphSeparator => Self::ZP,
            Control => Self::CC,
            Format => Self::CF,
            PrivateUse => Self::CO,
            _ => Self::CN,
        }
    }

    /// Look up a category by its short code (`Lu`) or long name (`Uppercase_Letter`).
    ///
    /// Long names are matched ignoring case, underscores, spaces, and hyphens.
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '_' | ' ' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        CATEGORY_NAMES
            .iter()
            .find(|(short, long, _)| {
                key == short.to_ascii_lowercase() || key == long.to_ascii_lowercase()
            })
            .map(|&(_, _, set)| set)
    }
}

/// `(short code, long name with separators removed, set)`.
const CATEGORY_NAMES: &[(&str, &str, CategorySet)] = &[
    ("L", "Letter", CategorySet::L),
    ("LC", "CasedLetter", CategorySet::LC),
    ("Lu", "UppercaseLetter", CategorySet::LU),
    ("Ll", "LowercaseLetter", CategorySet::LL),
    ("Lt", "TitlecaseLetter", CategorySet::LT),
    ("Lm", "ModifierLetter", CategorySet::LM),
    ("Lo", "OtherLetter", CategorySet::LO),
    ("M", "Mark", CategorySet::M),
    ("Mn", "NonspacingMark", CategorySet::MN),
    ("Mc", "SpacingMark", CategorySet::MC),
    ("Me", "EnclosingMark", CategorySet::ME),
    ("N", "Number", CategorySet::N),
    ("Nd", "DecimalNumber", CategorySet::ND),
    ("Nl", "LetterNumber", CategorySet::NL),
    ("No", "OtherNumber", CategorySet::NO),
    ("P", "Punctuation", CategorySet::P),
    ("Pc", "ConnectorPunctuation", CategorySet::PC),
    ("Pd", "DashPunctuation", CategorySet::PD),
    ("Ps", "OpenPunctuation", CategorySet::PS),
    ("Pe", "ClosePunctuation", CategorySet::PE),
    ("Pi", "InitialPunctuation", CategorySet::PI),
    ("Pf", "FinalPunctuation", CategorySet::PF),
    ("Po", "OtherPunctuation", CategorySet::PO),
    ("S", "Symbol", CategorySet::S),
    ("Sm", "MathSymbol", CategorySet::SM),
    ("Sc", "CurrencySymbol", CategorySet::SC),
    ("Sk", "ModifierSymbol", CategorySet::SK),
    ("So", "OtherSymbol", CategorySet::SO),
    ("Z", "Separator", CategorySet::Z),
    ("Zs", "SpaceSeparator", CategorySet::ZS),
    ("Zl", "LineSeparator", CategorySet::ZL),
    ("Zp", "ParagraphSeparator", CategorySet::ZP),
    ("C", "Other", CategorySet::C),
    ("Cc", "Control", CategorySet::CC),
    ("Cf", "Format", CategorySet::CF),
    ("Cs", "Surrogate", CategorySet::CS),
    ("Co", "PrivateUse", CategorySet::CO),
    ("Cn", "Unassigned", CategorySet::CN),
];

/// Unicode `White_Space`.
pub fn is_space_char(c: char) -> bool {
    c.is_whitespace()
}

/// Unicode word character: alphanumerics, marks, and connector punctuation.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || CategorySet::M.union(CategorySet::PC).contains_char(c)
}

/// Simple case fold: the single-char lowercase mapping, or `c` itself.
pub fn simple_fold(c: char) -> char {
    single_char(c.to_lowercase()).unwrap_or(c)
}

/// The single-char uppercase mapping, or `c` itself.
pub fn simple_upper(c: char) -> char {
    single_char(c.to_uppercase()).unwrap_or(c)
}

fn single_char<I: Iterator<Item = char>>(mut it: I) -> Option<char> {
    match (it.next(), it.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// One member of a [`CharClass`].
#[derive(Debug, Clone, PartialEq)]
pub enum ClassItem {
    /// An inclusive code point range; single chars are `Range(c, c)`.
    Range(char, char),

    /// A union of general categories (`\p{..}`, `\d`).
    Categories {
        /// The categories.
        set: CategorySet,

        /// Complemented (`\P{..}`, `\D`).
        negated: bool,
    },

    /// `\s` / `\S`.
    Space {
        /// Complemented (`\S`).
        negated: bool,
    },

    /// `\w` / `\W`.
    Word {
        /// Complemented (`\W`).
        negated: bool,
    },
}

impl ClassItem {
    /// Does this item match `c`?
    pub fn contains(
        &self,
        c: char,
    ) -> bool {
        match *self {
            ClassItem::Range(lo, hi) => lo <= c && c <= hi,
            ClassItem::Categories { set, negated } => set.contains_char(c) != negated,
            ClassItem::Space { negated } => is_space_char(c) != negated,
            ClassItem::Word { negated } => is_word_char(c) != negated,
        }
    }
}

/// A character class: a union of [`ClassItem`]s, optionally complemented.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CharClass {
    items: Vec<ClassItem>,
    negated: bool,
}

impl CharClass {
    /// Build a class.
    ///
    /// ## Arguments
    /// * `items` - the union members.
    /// * `negated` - complement the union (`[^...]`).
    pub fn new(
        items: Vec<ClassItem>,
        negated: bool,
    ) -> Self {
        Self { items, negated }
    }

    /// A class holding a single item.
    pub fn single(item: ClassItem) -> Self {
        Self::new(vec![item], false)
    }

    /// The union members.
    pub fn items(&self) -> &[ClassItem] {
        &self.items
    }

    /// Is the class complemented?
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Does the class match `c`?
    ///
    /// With `fold`, an item also matches when it contains the simple
    /// lower- or uppercase variant of `c`; complement applies afterwards.
    pub fn matches(
        &self,
        c: char,
        fold: bool,
    ) -> bool {
        let hit = if fold {
            let lower = simple_fold(c);
            let upper = simple_upper(c);
            self.items
                .iter()
                .any(|item| item.contains(c) || item.contains(lower) || item.contains(upper))
        } else {
            self.items.iter().any(|item| item.contains(c))
        };
        hit != self.negated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names() {
        assert_eq!(CategorySet::from_name("L"), Some(CategorySet::L));
        assert_eq!(CategorySet::from_name("Letter"), Some(CategorySet::L));
        assert_eq!(CategorySet::from_name("Lu"), Some(CategorySet::LU));
        assert_eq!(
            CategorySet::from_name("Uppercase_Letter"),
            Some(CategorySet::LU)
        );
        assert_eq!(
            CategorySet::from_name("decimal number"),
            Some(CategorySet::ND)
        );
        assert_eq!(CategorySet::from_name("Xx"), None);

        assert!(CategorySet::L.contains(CategorySet::LT));
        assert!(!CategorySet::LC.contains(CategorySet::LO));
        assert!(CategorySet::C.contains(CategorySet::CN));
    }

    #[test]
    fn test_categories_per_code_point() {
        assert!(CategorySet::L.contains_char('a'));
        assert!(CategorySet::L.contains_char('\u{4f60}'));
        assert!(CategorySet::LU.contains_char('\u{00c9}'));
        assert!(CategorySet::N.contains_char('7'));
        assert!(CategorySet::N.contains_char('\u{0663}'));
        assert!(CategorySet::N.contains_char('\u{00bd}'));
        assert!(CategorySet::P.contains_char('!'));
        assert!(CategorySet::S.contains_char('$'));
        assert!(CategorySet::M.contains_char('\u{0301}'));
        assert!(CategorySet::Z.contains_char('\u{00a0}'));
        assert!(CategorySet::C.contains_char('\n'));
        assert!(!CategorySet::L.contains_char('1'));
    }

    #[test]
    fn test_perl_helpers() {
        assert!(is_space_char(' '));
        assert!(is_space_char('\u{2003}'));
        assert!(is_space_char('\n'));
        assert!(!is_space_char('x'));

        assert!(is_word_char('_'));
        assert!(is_word_char('\u{00e9}'));
        assert!(is_word_char('9'));
        assert!(!is_word_char('-'));

        assert_eq!(simple_fold('A'), 'a');
        assert_eq!(simple_fold('\u{0130}'), '\u{0130}');
        assert_eq!(simple_upper('s'), 'S');
    }

    #[test]
    fn test_class_matches() {
        // [^\s\p{L}\p{N}]
        let class = CharClass::new(
            vec![
                ClassItem::Space { negated: false },
                ClassItem::Categories {
                    set: CategorySet::L,
                    negated: false,
                },
                ClassItem::Categories {
                    set: CategorySet::N,
                    negated: false,
                },
            ],
            true,
        );
        assert!(class.matches('!', false));
        assert!(class.matches('$', false));
        assert!(!class.matches(' ', false));
        assert!(!class.matches('a', false));
        assert!(!class.matches('4', false));

        let lower = CharClass::single(ClassItem::Range('a', 'z'));
        assert!(!lower.matches('Q', false));
        assert!(lower.matches('Q', true));

        let not_a = CharClass::new(vec![ClassItem::Range('a', 'a')], true);
        assert!(not_a.matches('A', false));
        assert!(!not_a.matches('A', true));
    }
}
