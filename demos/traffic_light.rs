use enum_map_fixed::{EnumMap, enum_key};

enum_key! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Red,
        RedAmber,
        Green,
        Amber,
    }
}

fn next(light: Light) -> Light {
    match light {
        Light::Red => Light::RedAmber,
        Light::RedAmber => Light::Green,
        Light::Green => Light::Amber,
        Light::Amber => Light::Red,
    }
}

fn main() {
    let durations = EnumMap::<Light, u32>::create_with_all_entries([
        (Light::Red, 30),
        (Light::RedAmber, 2),
        (Light::Green, 25),
        (Light::Amber, 3),
    ]);

    let mut visits: EnumMap<Light, u32> = EnumMap::new();
    let mut light = Light::Red;
    let mut elapsed = 0;
    while elapsed < 120 {
        *visits.get_or_insert_default(light) += 1;
        elapsed += durations[light];
        light = next(light);
    }

    for (light, count) in &visits {
        println!("{light:?}: {count} phase(s), {}s", count * durations[light]);
    }
}
