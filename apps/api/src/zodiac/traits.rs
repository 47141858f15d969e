//! Static per-sign descriptors used by the prompt builder and the template generator.

use super::ZodiacSign;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
    Unknown,
}

impl Element {
    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Air => "Air",
            Element::Water => "Water",
            Element::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignTraits {
    pub traits: &'static str,
    pub element: Element,
    pub strengths: &'static str,
}

pub fn traits(sign: ZodiacSign) -> SignTraits {
    let (traits, element, strengths) = match sign {
        ZodiacSign::Aries => (
            "bold, energetic, and pioneering",
            Element::Fire,
            "leadership, courage, determination",
        ),
        ZodiacSign::Taurus => (
            "grounded, reliable, and sensual",
            Element::Earth,
            "patience, stability, practicality",
        ),
        ZodiacSign::Gemini => (
            "curious, adaptable, and communicative",
            Element::Air,
            "versatility, wit, social skills",
        ),
        ZodiacSign::Cancer => (
            "intuitive, nurturing, and emotional",
            Element::Water,
            "empathy, loyalty, imagination",
        ),
        ZodiacSign::Leo => (
            "confident, warm, and charismatic",
            Element::Fire,
            "leadership, creativity, generosity",
        ),
        ZodiacSign::Virgo => (
            "analytical, practical, and detail-oriented",
            Element::Earth,
            "precision, reliability, problem-solving",
        ),
        ZodiacSign::Libra => (
            "diplomatic, balanced, and harmonious",
            Element::Air,
            "fairness, charm, cooperation",
        ),
        ZodiacSign::Scorpio => (
            "intense, passionate, and transformative",
            Element::Water,
            "determination, resourcefulness, depth",
        ),
        ZodiacSign::Sagittarius => (
            "adventurous, optimistic, and philosophical",
            Element::Fire,
            "enthusiasm, honesty, open-mindedness",
        ),
        ZodiacSign::Capricorn => (
            "ambitious, disciplined, and responsible",
            Element::Earth,
            "perseverance, organization, wisdom",
        ),
        ZodiacSign::Aquarius => (
            "innovative, independent, and humanitarian",
            Element::Air,
            "originality, idealism, friendliness",
        ),
        ZodiacSign::Pisces => (
            "compassionate, intuitive, and artistic",
            Element::Water,
            "empathy, creativity, adaptability",
        ),
        ZodiacSign::Unknown => (
            "unique and special",
            Element::Unknown,
            "versatility and adaptability",
        ),
    };

    SignTraits {
        traits,
        element,
        strengths,
    }
}

/// Rule-based daily prediction: the sign's trait phrase plus an element sentence.
pub fn base_prediction(sign: ZodiacSign) -> String {
    let info = traits(sign);

    let sentence = match info.element {
        Element::Fire => "Your passionate energy will drive you forward today. Channel your enthusiasm into productive endeavors.",
        Element::Earth => "Your grounded nature will help you handle unexpected work pressure. Stay practical and focused.",
        Element::Air => "Your communication skills will be highlighted today. Share your ideas and connect with others.",
        Element::Water => "Your intuition will guide you through emotional situations. Trust your inner voice.",
        Element::Unknown => "Today brings opportunities for growth and self-discovery.",
    };

    format!("Your {} nature suggests that {}", info.traits, sentence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elements_cover_three_signs_each() {
        for element in [Element::Fire, Element::Earth, Element::Air, Element::Water] {
            let count = ZodiacSign::ALL
                .iter()
                .filter(|s| traits(**s).element == element)
                .count();
            assert_eq!(count, 3, "{} should have three signs", element.as_str());
        }
    }

    #[test]
    fn test_unknown_sign_gets_generic_traits() {
        let info = traits(ZodiacSign::Unknown);
        assert_eq!(info.traits, "unique and special");
        assert_eq!(info.element, Element::Unknown);
    }

    #[test]
    fn test_base_prediction_uses_element_sentence() {
        let leo = base_prediction(ZodiacSign::Leo);
        assert!(leo.starts_with("Your confident, warm, and charismatic nature suggests that"));
        assert!(leo.contains("passionate energy"));

        let virgo = base_prediction(ZodiacSign::Virgo);
        assert!(virgo.contains("unexpected work pressure"));

        let unknown = base_prediction(ZodiacSign::Unknown);
        assert!(unknown.contains("growth and self-discovery"));
    }
}
