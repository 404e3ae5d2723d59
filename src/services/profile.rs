use crate::models::{QuizAnswers, TasteProfile};

const DEFAULT_VISUAL_STYLE: &str = "cyberpunk";
const DEFAULT_MOVIE: &str = "blade_runner";
const DEFAULT_COLORS: [&str; 2] = ["red", "black"];
const DEFAULT_TIME_OF_DAY: &str = "night";
const DEFAULT_PRIMARY_GENRE: &str = "electronic";
const DEFAULT_AESTHETIC: &str = "gothic";
const DEFAULT_ERA: &str = "all";
const LISTENING_CONTEXT: &str = "focused";

// Not derived from the answers yet.
const LYRICS_IMPORTANCE: u8 = 7;
const INSTRUMENTAL_COMPLEXITY: u8 = 8;

const VISUAL_STYLE_QUESTION: u8 = 1;
const MOVIE_QUESTION: u8 = 2;
const COLORS_QUESTION: u8 = 3;
const TIME_OF_DAY_QUESTION: u8 = 4;
const PRIMARY_GENRE_QUESTION: u8 = 5;
const AESTHETIC_QUESTION: u8 = 6;

const ANSWER_BUCKETS: u32 = 10;
const COLOR_BUCKETS: u32 = 5;

/// 32-bit rolling string hash
///
/// Walks the UTF-16 code units of `s` computing `h = (h << 5) - h + unit`
/// with wrapping signed 32-bit arithmetic, then returns `|h|`. The absolute
/// value of `i32::MIN` is `2^31`, which is why the result is a `u32`.
/// Vectors are only comparable across implementations if this is reproduced
/// exactly.
pub fn string_hash(s: &str) -> u32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| {
            h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit))
        })
        .unsigned_abs()
}

/// Maps a string into `[0, 1)` using `buckets` equal steps
pub fn hash_component(s: &str, buckets: u32) -> f64 {
    f64::from(string_hash(s) % buckets) / f64::from(buckets)
}

/// Builds a taste profile from quiz answers
///
/// Missing questions fall back to fixed defaults. The numeric `vector` only
/// covers questions that were actually answered.
pub fn derive_profile(answers: &QuizAnswers) -> TasteProfile {
    let answer = |question: u8| answers.get(&question).and_then(|a| a.as_single());

    let colors = answers
        .get(&COLORS_QUESTION)
        .and_then(|a| a.as_list())
        .unwrap_or_else(|| DEFAULT_COLORS.iter().map(|c| c.to_string()).collect());

    let visual_style = answer(VISUAL_STYLE_QUESTION).unwrap_or(DEFAULT_VISUAL_STYLE);
    let movie = answer(MOVIE_QUESTION).unwrap_or(DEFAULT_MOVIE);

    TasteProfile {
        visual_style: Some(visual_style.to_string()),
        movie: Some(movie.to_string()),
        colors,
        time_of_day: Some(answer(TIME_OF_DAY_QUESTION).unwrap_or(DEFAULT_TIME_OF_DAY).to_string()),
        primary_genre: Some(
            answer(PRIMARY_GENRE_QUESTION)
                .unwrap_or(DEFAULT_PRIMARY_GENRE)
                .to_string(),
        ),
        aesthetic: Some(answer(AESTHETIC_QUESTION).unwrap_or(DEFAULT_AESTHETIC).to_string()),
        vector: answer_vector(answers),
        genre: genres_for(visual_style, movie),
        mood: moods_for(answer(VISUAL_STYLE_QUESTION)),
        era: Some(era_for(answer(MOVIE_QUESTION), answer(VISUAL_STYLE_QUESTION)).to_string()),
        listening_context: Some(LISTENING_CONTEXT.to_string()),
        lyrics_importance: LYRICS_IMPORTANCE,
        instrumental_complexity: INSTRUMENTAL_COMPLEXITY,
    }
}

fn answer_vector(answers: &QuizAnswers) -> Vec<f64> {
    let mut vector = Vec::new();

    for (question, value) in answers {
        match *question {
            COLORS_QUESTION => vector.extend(
                value
                    .as_list()
                    .unwrap_or_default()
                    .iter()
                    .map(|color| hash_component(color, COLOR_BUCKETS)),
            ),
            VISUAL_STYLE_QUESTION..=AESTHETIC_QUESTION => {
                if let Some(value) = value.as_single() {
                    vector.push(hash_component(value, ANSWER_BUCKETS));
                }
            }
            other => tracing::debug!(question = other, "Ignoring unknown quiz question"),
        }
    }

    vector
}

/// Genre list keyed by visual style, then by movie
fn genres_for(visual_style: &str, movie: &str) -> Vec<String> {
    let genres: &[&str] = genre_table(visual_style)
        .or_else(|| genre_table(movie))
        .unwrap_or(&["electronic", "rock"]);
    genres.iter().map(|g| g.to_string()).collect()
}

fn genre_table(key: &str) -> Option<&'static [&'static str]> {
    Some(match key {
        "cyberpunk" => &["electronic", "industrial"],
        "gothic" => &["rock", "metal"],
        "vaporwave" => &["electronic", "pop"],
        "dreamy" => &["ambient", "indie"],
        "blade_runner" => &["electronic", "ambient"],
        "pulp_fiction" => &["rock", "pop"],
        "interstellar" => &["classical", "ambient"],
        "la_la_land" => &["jazz", "pop"],
        _ => return None,
    })
}

/// Mood list keyed by the answered visual style only
fn moods_for(visual_style: Option<&str>) -> Vec<String> {
    let moods: &[&str] = match visual_style {
        Some("cyberpunk") => &["energy", "melancholy"],
        Some("nature") => &["calm", "inspiration"],
        Some("retro") => &["nostalgia", "calm"],
        Some("gothic") => &["melancholy", "aggression"],
        Some("vaporwave") => &["nostalgia", "calm"],
        Some("dreamy") => &["calm", "inspiration"],
        _ => &["energy", "melancholy"],
    };
    moods.iter().map(|m| m.to_string()).collect()
}

/// Era keyed by the answered movie, then the answered visual style
fn era_for(movie: Option<&str>, visual_style: Option<&str>) -> &'static str {
    movie
        .and_then(era_table)
        .or_else(|| visual_style.and_then(era_table))
        .unwrap_or(DEFAULT_ERA)
}

fn era_table(key: &str) -> Option<&'static str> {
    Some(match key {
        "cyberpunk" => "2010s",
        "retro" => "1980s",
        "gothic" => "1990s",
        "vaporwave" => "1980s",
        "pulp_fiction" => "1990s",
        "interstellar" => "2010s",
        "la_la_land" => "2010s",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnswerValue;

    fn answers(pairs: Vec<(u8, AnswerValue)>) -> QuizAnswers {
        pairs.into_iter().collect()
    }

    #[test]
    fn test_string_hash_known_values() {
        assert_eq!(string_hash(""), 0);
        assert_eq!(string_hash("a"), 97);
        assert_eq!(string_hash("red"), 112785);
        assert_eq!(string_hash("cyberpunk"), 1658613339);
        // Negative before the absolute value
        assert_eq!(string_hash("blade_runner"), 1551924937);
        assert_eq!(string_hash("gothic"), 1240094858);
    }

    #[test]
    fn test_string_hash_uses_utf16_units() {
        // U+1F3B5 is a surrogate pair: 0xD83C, 0xDFB5
        let expected = (0xD83Ci32 * 31 + 0xDFB5).unsigned_abs();
        assert_eq!(string_hash("\u{1F3B5}"), expected);
    }

    #[test]
    fn test_hash_component_buckets() {
        assert_eq!(hash_component("cyberpunk", 10), 0.9);
        assert_eq!(hash_component("blade_runner", 10), 0.7);
        assert_eq!(hash_component("black", 5), 0.8);
        assert_eq!(hash_component("red", 5), 0.0);
    }

    #[test]
    fn test_defaults_for_empty_answers() {
        let profile = derive_profile(&QuizAnswers::new());
        assert_eq!(profile.visual_style(), Some("cyberpunk"));
        assert_eq!(profile.movie(), Some("blade_runner"));
        assert_eq!(profile.colors, vec!["red", "black"]);
        assert_eq!(profile.time_of_day.as_deref(), Some("night"));
        assert_eq!(profile.primary_genre.as_deref(), Some("electronic"));
        assert_eq!(profile.aesthetic.as_deref(), Some("gothic"));
        assert_eq!(profile.genre, vec!["electronic", "industrial"]);
        assert_eq!(profile.mood, vec!["energy", "melancholy"]);
        assert_eq!(profile.era.as_deref(), Some("all"));
        assert_eq!(profile.listening_context.as_deref(), Some("focused"));
        assert_eq!(profile.lyrics_importance, 7);
        assert_eq!(profile.instrumental_complexity, 8);
        assert!(profile.vector.is_empty());
    }

    #[test]
    fn test_vector_covers_answered_values() {
        let profile = derive_profile(&answers(vec![
            (1, "cyberpunk".into()),
            (2, "blade_runner".into()),
            (3, vec!["red", "black"].into()),
            (4, "night".into()),
        ]));
        assert_eq!(profile.vector, vec![0.9, 0.7, 0.0, 0.8, 0.8]);
        assert!(profile.vector.iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn test_single_color_is_a_list() {
        let profile = derive_profile(&answers(vec![(3, "black".into())]));
        assert_eq!(profile.colors, vec!["black"]);
        assert_eq!(profile.vector, vec![0.8]);
    }

    #[test]
    fn test_vector_is_deterministic() {
        let input = answers(vec![
            (1, "gothic".into()),
            (2, "drive".into()),
            (3, vec!["purple"].into()),
            (5, "post-punk".into()),
            (6, "minimal".into()),
        ]);
        let first = derive_profile(&input);
        let second = derive_profile(&input);
        let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&first.vector), bits(&second.vector));
    }

    #[test]
    fn test_genre_falls_back_to_movie() {
        let profile = derive_profile(&answers(vec![
            (1, "nature".into()),
            (2, "interstellar".into()),
        ]));
        assert_eq!(profile.genre, vec!["classical", "ambient"]);
        assert_eq!(profile.mood, vec!["calm", "inspiration"]);
    }

    #[test]
    fn test_genre_global_default() {
        let profile = derive_profile(&answers(vec![(1, "minimal".into()), (2, "drive".into())]));
        assert_eq!(profile.genre, vec!["electronic", "rock"]);
    }

    #[test]
    fn test_era_prefers_movie_over_style() {
        let profile = derive_profile(&answers(vec![
            (1, "retro".into()),
            (2, "pulp_fiction".into()),
        ]));
        assert_eq!(profile.era.as_deref(), Some("1990s"));

        let profile = derive_profile(&answers(vec![(1, "retro".into()), (2, "drive".into())]));
        assert_eq!(profile.era.as_deref(), Some("1980s"));
    }

    #[test]
    fn test_empty_string_uses_default() {
        let profile = derive_profile(&answers(vec![(1, "".into())]));
        assert_eq!(profile.visual_style(), Some("cyberpunk"));
        assert!(profile.vector.is_empty());
    }

    #[test]
    fn test_empty_color_answer_uses_default_colors() {
        let profile = derive_profile(&answers(vec![(3, "".into())]));
        assert_eq!(profile.colors, vec!["red", "black"]);
        assert!(profile.vector.is_empty());
    }
}
