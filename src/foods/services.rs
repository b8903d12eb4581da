use super::repo_types::{FoodRecord, Suitability};

const GI_LOW_BELOW: i32 = 55;
const GI_HIGH_FROM: i32 = 70;

/// Composes a plain-language explanation of a food's diabetic rating.
///
/// Clauses, in order: rating opener, glycemic index (skipped when 0),
/// sugar, carbs, protein (skipped at 5g or less).
pub fn explain(food: &FoodRecord) -> String {
    let mut clauses: Vec<String> = Vec::with_capacity(5);

    if let Some(opening) = opening(food) {
        clauses.push(opening);
    }

    let gi = food.glycemic_index;
    if gi > 0 {
        clauses.push(if gi < GI_LOW_BELOW {
            format!("It has a low glycemic index of {gi}, which means it will cause a slower rise in blood sugar.")
        } else if gi < GI_HIGH_FROM {
            format!("It has a medium glycemic index of {gi}, so monitor your portion sizes.")
        } else {
            format!("It has a high glycemic index of {gi}, which can cause rapid blood sugar spikes.")
        });
    }

    let sugar = food.sugar;
    clauses.push(if sugar > 10.0 {
        format!("It contains {sugar}g of sugar per serving, which is relatively high.")
    } else if sugar > 5.0 {
        format!("It contains a moderate amount of sugar ({sugar}g per serving).")
    } else {
        format!("It's low in sugar ({sugar}g per serving).")
    });

    let carbs = food.carbs;
    clauses.push(if carbs > 30.0 {
        format!("With {carbs}g of carbs, this is a high-carb food that should be carefully portioned.")
    } else if carbs > 15.0 {
        format!("It contains a moderate amount of carbs ({carbs}g).")
    } else {
        format!("It's relatively low in carbs ({carbs}g).")
    });

    let protein = food.protein;
    if protein > 15.0 {
        clauses.push(format!(
            "It's high in protein ({protein}g), which is beneficial for steady blood sugar."
        ));
    } else if protein > 5.0 {
        clauses.push(format!("It contains a moderate amount of protein ({protein}g)."));
    }

    clauses.join(" ")
}

fn opening(food: &FoodRecord) -> Option<String> {
    let name = &food.name;
    match food.diabetic_suitability {
        Suitability::Safe => Some(format!("{name} is generally safe for diabetic patients.")),
        Suitability::Moderate => Some(format!(
            "{name} should be consumed in moderation by diabetic patients."
        )),
        Suitability::Avoid => Some(format!(
            "{name} should generally be avoided by diabetic patients."
        )),
        Suitability::Unknown(_) => None,
    }
}
