use models::cafe::NewCafe;

struct Sample {
    name: &'static str,
    location: &'static str,
    slug: &'static str,
    seats: i32,
    toilet: bool,
    wifi: bool,
    sockets: bool,
    calls: bool,
    price: f64,
}

const SAMPLES: [Sample; 4] = [
    Sample { name: "Science Gallery London", location: "London Bridge", slug: "science-gallery", seats: 50, toilet: true, wifi: false, sockets: true, calls: true, price: 2.40 },
    Sample { name: "Social - Copeland Road", location: "Peckham", slug: "social-copeland", seats: 20, toilet: true, wifi: true, sockets: false, calls: true, price: 2.75 },
    Sample { name: "One & All Cafe Peckham", location: "Peckham", slug: "one-and-all", seats: 30, toilet: true, wifi: true, sockets: true, calls: false, price: 2.50 },
    Sample { name: "Mare Street Market", location: "Hackney", slug: "mare-street", seats: 50, toilet: true, wifi: true, sockets: true, calls: true, price: 2.80 },
];

/// Fixed demonstration cafes used to seed an empty directory.
pub fn sample_cafes() -> Vec<NewCafe> {
    SAMPLES
        .iter()
        .map(|s| NewCafe {
            name: s.name.to_string(),
            map_url: format!("https://maps.example.com/{}", s.slug),
            img_url: format!("https://images.example.com/{}.jpg", s.slug),
            location: s.location.to_string(),
            seats: s.seats,
            has_toilet: s.toilet,
            has_wifi: s.wifi,
            has_sockets: s.sockets,
            can_take_calls: s.calls,
            coffee_price: s.price,
        })
        .collect()
}
