/// Representative notes per scent family. Fixed taxonomy, initialized in the
/// binary image; there is no runtime mutation path.
const FAMILY_NOTES: [(&str, &[&str]); 6] = [
    (
        "Floral",
        &["Rose", "Jasmine", "Lily", "Peony", "Tuberose", "Iris", "Violet"],
    ),
    (
        "Woody",
        &["Sandalwood", "Cedar", "Oud", "Vetiver", "Patchouli", "Birch"],
    ),
    (
        "Fresh",
        &["Citrus", "Bergamot", "Grapefruit", "Mint", "Green Tea", "Marine"],
    ),
    (
        "Spicy",
        &["Cardamom", "Cinnamon", "Pepper", "Clove", "Ginger", "Saffron"],
    ),
    (
        "Sweet",
        &["Vanilla", "Caramel", "Honey", "Tonka Bean", "Amber", "Benzoin"],
    ),
    (
        "Musky",
        &["White Musk", "Ambroxan", "Cashmere", "Skin Musk", "Clean Musk"],
    ),
];

/// Infers which families a user leans toward from their preferred notes.
/// A family qualifies when at least one preferred note matches one of its
/// representative notes, case-insensitively. Recomputed on every call.
pub(crate) fn infer_preferred_families(preferred_notes: &[String]) -> Vec<&'static str> {
    FAMILY_NOTES
        .iter()
        .filter(|(_, notes)| {
            preferred_notes.iter().any(|preferred| {
                notes
                    .iter()
                    .any(|note| note.to_lowercase() == preferred.to_lowercase())
            })
        })
        .map(|(family, _)| *family)
        .collect()
}
