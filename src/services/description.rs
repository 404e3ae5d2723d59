use rand::seq::IndexedRandom;
use rand::Rng;

use crate::models::{Product, Source, TasteProfile};

/// Returned when a description cannot be put together
pub const FALLBACK_DESCRIPTION: &str = "This record suits your mood perfectly! ✨";

/// Opening used when nothing specific is known about the listener
pub const GENERIC_OPENING: &str = "This record could be a great addition to your collection!";

const MAX_CLAUSES: usize = 2;

const FLAVOR_SENTENCES: [&str; 5] = [
    "✨ It will create a special atmosphere.",
    "🎵 This album definitely deserves your attention.",
    "💫 Many people with your taste already love it.",
    "⭐ A great choice for your collection.",
    "🌟 You won't regret buying it.",
];

fn mood_label(mood: &str) -> &str {
    match mood {
        "energy" => "energetic music",
        "melancholy" => "melancholic melodies",
        "calm" => "calm atmosphere",
        "aggression" => "powerful sound",
        "nostalgia" => "nostalgic notes",
        "inspiration" => "inspiring tracks",
        other => other,
    }
}

fn style_label(style: &str) -> &str {
    match style {
        "cyberpunk" => "the cyberpunk aesthetic",
        "gothic" => "the gothic atmosphere",
        "vaporwave" => "the vaporwave style",
        "dreamy" => "a dreamy mood",
        "industrial" => "the industrial sound",
        "minimal" => "minimalism",
        "nature" => "natural motifs",
        "retro" => "the retro style",
        other => other,
    }
}

fn movie_title(movie: &str) -> &str {
    match movie {
        "blade_runner" => "Blade Runner",
        "pulp_fiction" => "Pulp Fiction",
        "interstellar" => "Interstellar",
        "drive" => "Drive",
        "la_la_land" => "La La Land",
        other => other,
    }
}

fn source_label(source: Source) -> &'static str {
    match source {
        Source::Test => "your quiz",
        Source::Purchase => "your purchases",
        Source::Favorite => "your favorites",
        Source::Collaborative => "similar people",
        Source::Popular => "what's popular",
    }
}

/// Builds a personal explanation of why `product` was recommended
///
/// Any of the inputs may be missing or partial; absent parts just drop their
/// clause. Never fails: if no sentence can be produced the fixed
/// [`FALLBACK_DESCRIPTION`] is returned.
pub fn synthesize_description<R: Rng + ?Sized>(
    profile: Option<&TasteProfile>,
    product: Option<&Product>,
    sources: &[Source],
    rng: &mut R,
) -> String {
    compose(profile, product, sources, rng).unwrap_or_else(|| {
        tracing::warn!("Falling back to the generic description");
        FALLBACK_DESCRIPTION.to_string()
    })
}

fn compose<R: Rng + ?Sized>(
    profile: Option<&TasteProfile>,
    product: Option<&Product>,
    sources: &[Source],
    rng: &mut R,
) -> Option<String> {
    let clauses = reason_clauses(profile, product, sources);

    let opening = if clauses.is_empty() {
        GENERIC_OPENING.to_string()
    } else {
        let shown: Vec<&str> = clauses.iter().take(MAX_CLAUSES).map(String::as_str).collect();
        format!("This record suits you perfectly because {}.", shown.join(" and "))
    };

    let flavor = FLAVOR_SENTENCES.choose(rng)?;
    Some(format!("{} {}", opening, flavor))
}

fn reason_clauses(
    profile: Option<&TasteProfile>,
    product: Option<&Product>,
    sources: &[Source],
) -> Vec<String> {
    let mut clauses = Vec::new();

    if let Some(profile) = profile {
        if let Some(category) = product.and_then(Product::category) {
            if profile.likes_genre(category) {
                clauses.push(format!("you like {}", category));
            }
        }

        if !profile.mood.is_empty() {
            let moods: Vec<&str> = profile.mood.iter().map(|m| mood_label(m)).collect();
            clauses.push(format!("you value {}", moods.join(" and ")));
        }

        if let Some(style) = profile.visual_style() {
            clauses.push(format!("{} speaks to you", style_label(style)));
        }

        if let Some(movie) = profile.movie() {
            clauses.push(format!("you love the film '{}'", movie_title(movie)));
        }
    }

    if !sources.is_empty() {
        let labels: Vec<&str> = sources.iter().map(|s| source_label(*s)).collect();
        clauses.push(format!(
            "this recommendation is based on {}",
            labels.join(", ")
        ));
    }

    clauses
}
