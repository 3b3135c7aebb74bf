//! Inline city completion
//!
//! Matches what has been typed against a built-in list of Swedish cities.
//! The first city whose name starts with the input (ignoring case) wins.

/// Cities offered as completions, most populous first
pub const SWEDISH_CITIES: &[&str] = &[
    // Major cities
    "Stockholm",
    "Göteborg",
    "Malmö",
    "Uppsala",
    "Västerås",
    "Örebro",
    "Linköping",
    "Helsingborg",
    "Jönköping",
    "Norrköping",
    "Lund",
    // Mid-sized
    "Umeå",
    "Gävle",
    "Borås",
    "Södertälje",
    "Eskilstuna",
    "Halmstad",
    "Växjö",
    "Karlstad",
    "Sundsvall",
    "Östersund",
    "Trollhättan",
    "Lidingö",
    "Borlänge",
    "Tumba",
    "Kristianstad",
    "Kalmar",
    "Falun",
    "Skövde",
    "Karlskrona",
    "Skellefteå",
    "Uddevalla",
    "Varberg",
    // Smaller towns
    "Åre",
    "Kiruna",
    "Visby",
    "Ystad",
    "Mora",
    "Kungälv",
    "Lerum",
    "Alingsås",
    "Landskrona",
    "Motala",
    "Trelleborg",
    "Ängelholm",
    "Karlshamn",
    "Lidköping",
    "Mariestad",
    "Värnamo",
    "Falkenberg",
    "Karlskoga",
    "Mjölby",
    "Höganäs",
    "Sandviken",
    "Vallentuna",
    // Stockholm suburbs
    "Solna",
    "Nacka",
    "Bromma",
    "Täby",
    "Sundbyberg",
    "Huddinge",
    "Järfälla",
    "Danderyd",
    "Sollentuna",
    "Åkersberga",
    "Upplands Väsby",
    // Gothenburg suburbs
    "Mölndal",
    "Partille",
    "Kungsbacka",
    "Härryda",
    "Ale",
];

/// First city starting with `input`, compared case-insensitively.
///
/// Empty input never matches.
pub fn suggest(input: &str) -> Option<&'static str> {
    if input.is_empty() {
        return None;
    }

    let needle = input.to_lowercase();
    SWEDISH_CITIES
        .iter()
        .copied()
        .find(|city| city.to_lowercase().starts_with(&needle))
}

/// The part of `suggestion` not yet typed, shown greyed after the cursor
pub fn ghost_remainder<'a>(input: &str, suggestion: &'a str) -> &'a str {
    let typed = input.chars().count();
    match suggestion.char_indices().nth(typed) {
        Some((offset, _)) => &suggestion[offset..],
        None => "",
    }
}
