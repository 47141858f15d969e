//! Deterministic template generator. Last resort when every provider fails.

use crate::zodiac::{SignTraits, ZodiacSign};

/// Returns the fixed English insight for `sign`, addressed to `name`.
pub fn generate(name: &str, sign: ZodiacSign, traits: &SignTraits, base_prediction: &str) -> String {
    match sign {
        ZodiacSign::Leo => format!("Dear {name}, your innate leadership and warmth will shine today. Embrace spontaneity and avoid overthinking. Your natural charisma will help you connect with others."),
        ZodiacSign::Aries => format!("{name}, your bold and energetic spirit will drive you forward today. Take initiative on projects that matter to you. Your courage will inspire those around you."),
        ZodiacSign::Taurus => format!("{name}, your grounded nature will help you handle unexpected work pressure today. Stay practical and trust your instincts. Your reliability is your strength."),
        ZodiacSign::Gemini => format!("{name}, your curiosity and communication skills will be highlighted today. Share your ideas freely and connect with others. Your adaptability will serve you well."),
        ZodiacSign::Cancer => format!("{name}, your intuition will guide you through emotional situations today. Trust your inner voice and nurture your relationships. Your empathy creates deep connections."),
        ZodiacSign::Virgo => format!("{name}, your analytical mind will help you solve complex problems today. Focus on details but don't lose sight of the bigger picture. Your precision is valuable."),
        ZodiacSign::Libra => format!("{name}, your diplomatic nature will help you find balance today. Seek harmony in your relationships and decisions. Your charm will open doors."),
        ZodiacSign::Scorpio => format!("{name}, your intensity and passion will fuel your pursuits today. Channel your determination into meaningful goals. Your depth of feeling is a gift."),
        ZodiacSign::Sagittarius => format!("{name}, your adventurous spirit will lead you to new opportunities today. Stay optimistic and open to learning. Your enthusiasm is contagious."),
        ZodiacSign::Capricorn => format!("{name}, your ambition and discipline will help you achieve your goals today. Stay organized and focused. Your perseverance will pay off."),
        ZodiacSign::Aquarius => format!("{name}, your innovative thinking will bring fresh perspectives today. Embrace your independence and share your unique ideas. Your idealism inspires others."),
        ZodiacSign::Pisces => format!("{name}, your compassion and creativity will flow today. Trust your artistic instincts and help those in need. Your empathy makes a difference."),
        ZodiacSign::Unknown => format!(
            "Dear {name}, your {} nature suggests that {base_prediction} Embrace your {} and trust the journey ahead.",
            traits.traits, traits.strengths
        ),
    }
}
