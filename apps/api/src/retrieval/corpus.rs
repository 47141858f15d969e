use crate::zodiac::ZodiacSign;

/// A fixed snippet of astrological text with its retrieval metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusEntry {
    pub id: &'static str,
    pub text: &'static str,
    pub zodiac: ZodiacSign,
    pub theme: &'static str,
    pub keywords: &'static [&'static str],
}

pub const CORPUS: [CorpusEntry; 12] = [
    CorpusEntry {
        id: "leo_leadership",
        text: "Leo individuals possess natural leadership qualities. Their warmth and charisma inspire others. Today, embrace your innate ability to guide and motivate.",
        zodiac: ZodiacSign::Leo,
        theme: "leadership",
        keywords: &["leadership", "charisma", "warmth", "inspire"],
    },
    CorpusEntry {
        id: "taurus_grounded",
        text: "Taurus signs are known for their grounded nature and practical approach. Your reliability helps you handle unexpected work pressure with stability.",
        zodiac: ZodiacSign::Taurus,
        theme: "stability",
        keywords: &["grounded", "practical", "reliable", "stability"],
    },
    CorpusEntry {
        id: "aries_energy",
        text: "Aries brings bold energy and pioneering spirit. Your courage drives you forward. Take initiative on projects that matter to you.",
        zodiac: ZodiacSign::Aries,
        theme: "energy",
        keywords: &["bold", "energetic", "courage", "initiative"],
    },
    CorpusEntry {
        id: "gemini_communication",
        text: "Gemini excels in communication and adaptability. Share your ideas freely and connect with others. Your curiosity opens new doors.",
        zodiac: ZodiacSign::Gemini,
        theme: "communication",
        keywords: &["communication", "adaptable", "curiosity", "ideas"],
    },
    CorpusEntry {
        id: "cancer_intuition",
        text: "Cancer signs are intuitive and nurturing. Trust your inner voice and nurture relationships. Your empathy creates deep connections.",
        zodiac: ZodiacSign::Cancer,
        theme: "intuition",
        keywords: &["intuitive", "nurturing", "empathy", "relationships"],
    },
    CorpusEntry {
        id: "virgo_analysis",
        text: "Virgo's analytical mind helps solve complex problems. Focus on details but maintain the bigger picture. Your precision is valuable.",
        zodiac: ZodiacSign::Virgo,
        theme: "analysis",
        keywords: &["analytical", "precision", "details", "problems"],
    },
    CorpusEntry {
        id: "libra_balance",
        text: "Libra seeks harmony and balance. Your diplomatic nature helps find equilibrium. Seek harmony in relationships and decisions.",
        zodiac: ZodiacSign::Libra,
        theme: "balance",
        keywords: &["harmony", "balance", "diplomatic", "equilibrium"],
    },
    CorpusEntry {
        id: "scorpio_intensity",
        text: "Scorpio's intensity and passion fuel meaningful pursuits. Channel determination into goals. Your depth of feeling is a gift.",
        zodiac: ZodiacSign::Scorpio,
        theme: "intensity",
        keywords: &["intense", "passion", "determination", "depth"],
    },
    CorpusEntry {
        id: "sagittarius_adventure",
        text: "Sagittarius brings adventurous spirit and optimism. Stay open to learning and new opportunities. Your enthusiasm is contagious.",
        zodiac: ZodiacSign::Sagittarius,
        theme: "adventure",
        keywords: &["adventurous", "optimistic", "learning", "enthusiasm"],
    },
    CorpusEntry {
        id: "capricorn_ambition",
        text: "Capricorn's ambition and discipline drive achievement. Stay organized and focused. Your perseverance will pay off.",
        zodiac: ZodiacSign::Capricorn,
        theme: "ambition",
        keywords: &["ambition", "discipline", "organized", "perseverance"],
    },
    CorpusEntry {
        id: "aquarius_innovation",
        text: "Aquarius brings innovative thinking and independence. Embrace your unique ideas and share them. Your idealism inspires others.",
        zodiac: ZodiacSign::Aquarius,
        theme: "innovation",
        keywords: &["innovative", "independent", "unique", "idealism"],
    },
    CorpusEntry {
        id: "pisces_compassion",
        text: "Pisces shows compassion and creativity. Trust your artistic instincts and help those in need. Your empathy makes a difference.",
        zodiac: ZodiacSign::Pisces,
        theme: "compassion",
        keywords: &["compassion", "creativity", "artistic", "empathy"],
    },
];
