//! Presentation tables: dramatic messages, ASCII art and Croatian day names.

use chrono::Weekday;
use common::models::Condition;
use rand::Rng;

/// Picks a random dramatic message for a condition. Conditions without a
/// message pool borrow the sunny one.
pub fn dramatic_message(condition: Condition) -> &'static str {
    let pool = message_pool(condition).unwrap_or_else(|| {
        message_pool(Condition::Sunny).expect("sunny message pool is always present")
    });
    pool[rand::rng().random_range(0..pool.len())]
}

fn message_pool(condition: Condition) -> Option<&'static [&'static str]> {
    let pool: &[&str] = match condition {
        Condition::Rain => &[
            "Kiša pada - Donesi kišobran!",
            "Mokri ulazak - Čuva se od kiše!",
            "Nebo se prazni - Ostani unutar!",
            "Kiša je ovdje - Bodljikavo vrijeme!",
        ],
        Condition::Sunny => &[
            "Sunce sjaji - Divno vrijeme!",
            "Zaštita od sunca preporučena!",
            "Najljepši dan godine!",
            "Idealno za planinu!",
        ],
        Condition::Cloudy => &[
            "Oblaci pokrivaju nebo!",
            "Blago sive boje - ali ugodno!",
            "Nema sunca ali nije loše!",
            "Tipično zimsko vrijeme!",
        ],
        Condition::PartlyCloudy => &[
            "Mješavina sunca i oblaka!",
            "Lijepo, ali može biti hladnije!",
            "Promjenjivo vrijeme!",
            "Oblaci se pojavljuju i nestaju!",
        ],
        Condition::Snow => &[
            "Snijeg pada - Zimska čarolija!",
            "Bijela pokrivka na zemlji!",
            "Zimski podaci - Odjevite se toplo!",
            "Snježni pejzaž je spektakularan!",
        ],
        _ => return None,
    };
    Some(pool)
}

/// ASCII art for a condition, with a placeholder for conditions that have
/// no drawing.
pub fn ascii_art(condition: Condition) -> &'static str {
    match condition {
        Condition::Rain => {
            r#"
    ___
   (____)
   /    \
   | ~~ |
    \ ~~/
     |~~|
    /|  |\
   / |  | \
  "#
        }
        Condition::Sunny => {
            r#"
      \  |  /
       \ | /
        \|/
    --- (*) ---
        /|\
       / | \
      /  |  \
  "#
        }
        Condition::Snow => {
            r#"
     *  *  *
    *  ❄️  *
     *  *  *
    **  *  **
  *    *    *
    *  *  *
  "#
        }
        Condition::Cloudy => {
            r#"
    (    )
     ( )
    _____
   |     |
  "#
        }
        Condition::PartlyCloudy => {
            r#"
      \  |  /
       \ | /
        \|/
    --- (*) ---
    (    )
     ( )
  "#
        }
        _ => "   (...weather brewing...)",
    }
}

pub fn croatian_day(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Ponedjeljak",
        Weekday::Tue => "Utorak",
        Weekday::Wed => "Srijeda",
        Weekday::Thu => "Četvrtak",
        Weekday::Fri => "Petak",
        Weekday::Sat => "Subota",
        Weekday::Sun => "Nedjelja",
    }
}
