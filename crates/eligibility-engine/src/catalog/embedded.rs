use crate::assessment::Provider;

struct ProviderSeed {
    id: &'static str,
    name: &'static str,
    specialties: &'static [&'static str],
    rating: f32,
    price_from: Option<u32>,
    wait_time: &'static str,
    booking_url: &'static str,
}

/// Default catalog served when no fetched or cached list has ever been available.
pub fn embedded_providers() -> Vec<Provider> {
    EMBEDDED_PROVIDERS
        .iter()
        .map(|seed| Provider {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            specialties: seed
                .specialties
                .iter()
                .map(|specialty| specialty.to_string())
                .collect(),
            rating: seed.rating,
            price_from: seed.price_from,
            wait_time: seed.wait_time.to_string(),
            booking_url: seed.booking_url.to_string(),
        })
        .collect()
}

const EMBEDDED_PROVIDERS: &[ProviderSeed] = &[
    ProviderSeed {
        id: "releaf-clinic",
        name: "Releaf Clinic",
        specialties: &["Chronic Pain Management", "Anxiety", "Insomnia"],
        rating: 4.8,
        price_from: Some(99),
        wait_time: "2-3 days",
        booking_url: "https://providers.example.com/releaf-clinic",
    },
    ProviderSeed {
        id: "curaleaf-clinic",
        name: "Curaleaf Clinic",
        specialties: &["Neurology", "Epilepsy", "Multiple Sclerosis"],
        rating: 4.6,
        price_from: Some(150),
        wait_time: "1 week",
        booking_url: "https://providers.example.com/curaleaf-clinic",
    },
    ProviderSeed {
        id: "alternaleaf",
        name: "Alternaleaf",
        specialties: &["Mental Health", "PTSD", "Anxiety"],
        rating: 4.5,
        price_from: Some(79),
        wait_time: "3-5 days",
        booking_url: "https://providers.example.com/alternaleaf",
    },
    ProviderSeed {
        id: "mamedica",
        name: "Mamedica",
        specialties: &["Chronic Pain", "Sleep Disorders", "Neurology"],
        rating: 4.4,
        price_from: Some(120),
        wait_time: "1-2 weeks",
        booking_url: "https://providers.example.com/mamedica",
    },
];
