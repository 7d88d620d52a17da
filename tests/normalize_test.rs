use madaq_signature::*;

// --- smart_title ---

#[test]
fn test_smart_title_multiple_words() {
    assert_eq!(smart_title("van der berg"), "Van Der Berg");
}

#[test]
fn test_smart_title_apostrophe() {
    assert_eq!(smart_title("d'angelo"), "D'Angelo");
}

#[test]
fn test_smart_title_hyphen() {
    assert_eq!(smart_title("van-der"), "Van-Der");
    assert_eq!(smart_title("anne-marie"), "Anne-Marie");
}

#[test]
fn test_smart_title_lowercases_rest() {
    assert_eq!(smart_title("  ROBERT  "), "Robert");
    assert_eq!(smart_title("mCdONALD"), "Mcdonald");
}

#[test]
fn test_smart_title_keeps_inner_whitespace() {
    assert_eq!(smart_title("anne  marie"), "Anne  Marie");
}

#[test]
fn test_smart_title_accented() {
    assert_eq!(smart_title("émile özdemir"), "Émile Özdemir");
}

#[test]
fn test_smart_title_empty() {
    assert_eq!(smart_title(""), "");
    assert_eq!(smart_title("   "), "");
}

// --- capitalize_first ---

#[test]
fn test_capitalize_first_only_first_letter() {
    assert_eq!(capitalize_first("baasje"), "Baasje");
    assert_eq!(capitalize_first("sales MANAGER"), "Sales MANAGER");
    assert_eq!(capitalize_first("chocolate artisan"), "Chocolate artisan");
}

#[test]
fn test_capitalize_first_trims() {
    assert_eq!(capitalize_first("  ceo "), "Ceo");
}

#[test]
fn test_capitalize_first_empty() {
    assert_eq!(capitalize_first(""), "");
}

// --- remove_accents ---

#[test]
fn test_remove_accents() {
    assert_eq!(remove_accents("Émile"), "Emile");
    assert_eq!(remove_accents("Özdemir"), "Ozdemir");
    assert_eq!(remove_accents("crème brûlée"), "creme brulee");
}

#[test]
fn test_remove_accents_plain_ascii_unchanged() {
    assert_eq!(remove_accents("Robert Morsman"), "Robert Morsman");
}

// --- safe_filename ---

#[test]
fn test_safe_filename_strips_accents() {
    let name = safe_filename("Émile", "Özdemir");
    assert_eq!(name, "EmileOzdemir");
    assert!(name.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn test_safe_filename_drops_symbols() {
    assert_eq!(safe_filename("Jean-Luc", "O'Brien"), "JeanLucOBrien");
    assert_eq!(safe_filename("Anne Marie", "van der Berg"), "AnneMarievanderBerg");
}

#[test]
fn test_safe_filename_fallback() {
    assert_eq!(safe_filename("", ""), DEFAULT_FILENAME);
    assert_eq!(safe_filename("!!", "--"), "signature");
}

// --- fold_keyword ---

#[test]
fn test_fold_keyword() {
    assert_eq!(fold_keyword("  Crème Brûlée "), "creme brulee");
    assert_eq!(fold_keyword("YUZU"), "yuzu");
}
