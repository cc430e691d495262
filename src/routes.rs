use std::collections::{ BTreeSet, HashMap };

// One direction of each route; the table is mirrored on construction.
const ROUTES: [(&str, &str, u32); 10] = [
    ("Chennai", "Bangalore", 350),
    ("Chennai", "Hyderabad", 630),
    ("Bangalore", "Hyderabad", 570),
    ("Bangalore", "Mumbai", 980),
    ("Hyderabad", "Mumbai", 710),
    ("Chennai", "Mumbai", 1330),
    ("Delhi", "Mumbai", 1410),
    ("Delhi", "Hyderabad", 1560),
    ("Delhi", "Bangalore", 1750),
    ("Delhi", "Chennai", 2200),
];

/// Static symmetric distance table between named cities, in kilometers.
pub struct RouteTable {
    routes: HashMap<(String, String), u32>,
}

impl Default for RouteTable {
    fn default() -> Self {
        let mut routes = HashMap::with_capacity(ROUTES.len() * 2);
        for (from, to, km) in ROUTES {
            routes.insert((from.to_string(), to.to_string()), km);
            routes.insert((to.to_string(), from.to_string()), km);
        }
        Self { routes }
    }
}

impl RouteTable {

    /// Distance between two endpoints, `None` when the pair is not in the
    /// table. Endpoints are normalized before lookup.
    pub fn distance(&self, from: &str, to: &str) -> Option<u32> {
        self.routes
            .get(&(normalize_city(from), normalize_city(to)))
            .copied()
    }

    /// Sorted list of every city the table knows about.
    pub fn cities(&self) -> Vec<&str> {
        let cities: BTreeSet<&str> = self.routes.keys().map(|(from, _)| from.as_str()).collect();
        cities.into_iter().collect()
    }

}

/// Trim and title-case, so "new  delhi" and "NEW DELHI" agree. A letter
/// following any non-letter starts a new word, so "navi-mumbai" becomes
/// "Navi-Mumbai".
pub fn normalize_city(name: &str) -> String {
    name.split_whitespace()
        .map(titlecase_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn titlecase_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut boundary = true;
    for c in word.chars() {
        if boundary {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        boundary = !c.is_alphabetic();
    }
    out
}
