//! Closed vocabularies used by the profile forms.

use super::macros::labeled_choice;

labeled_choice! {
    /// Gender as selected on the personal-info step.
    Gender {
        Male => "Male",
        Female => "Female",
        Other => "Other",
        PreferNotToSay => "Prefer not to say",
    }
}

labeled_choice! {
    /// Chronic conditions offered on the health step.
    Condition {
        DiabetesType1 => "Diabetes Type 1",
        DiabetesType2 => "Diabetes Type 2",
        Hypertension => "Hypertension",
        Asthma => "Asthma",
        HeartDisease => "Heart Disease",
        None => "None",
        Other => "Other",
    }
}

labeled_choice! {
    /// How often the user exercises.
    ExerciseFrequency {
        Never => "Never",
        OnceOrTwiceWeekly => "1-2 times/week",
        ThreeToFourWeekly => "3-4 times/week",
        FivePlusWeekly => "5+ times/week",
        Daily => "Daily",
    }
}

labeled_choice! {
    /// Diet preference.
    Diet {
        Balanced => "Balanced",
        LowCarb => "Low-carb",
        HighProtein => "High-protein",
        Vegetarian => "Vegetarian",
        Vegan => "Vegan",
        Keto => "Keto",
        Other => "Other",
    }
}

labeled_choice! {
    /// Smoking status.
    Smoking {
        Never => "Never",
        Former => "Former",
        Current => "Current",
    }
}

labeled_choice! {
    /// Alcohol consumption.
    Alcohol {
        Never => "Never",
        Occasionally => "Occasionally",
        Regularly => "Regularly",
    }
}
