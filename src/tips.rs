/// The static food-storage tip cards.
const TIPS: [(&str, &str); 2] = [
    (
        "Keep Produce Fresh",
        "Essential Tips for Storing Food Safely at Home.",
    ),
    (
        "Decode Expiry Dates",
        "Understand the difference between 'best by' and 'use by' dates.",
    ),
];

pub fn print_tips() {
    for (i, (title, description)) in TIPS.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{title}");
        println!("  {description}");
    }
}
