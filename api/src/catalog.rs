use serde::Serialize;

/// Used when a breed has no picture of its own.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/100";

const BREEDS: [(&str, &str); 10] = [
    ("Golden Retriever", "Friendly, intelligent, and devoted"),
    ("German Shepherd", "Confident, courageous, and smart"),
    ("Pug", "Charming, loving, and mischievous"),
    ("Beagle", "Curious, merry, and friendly"),
    ("Labrador", "Outgoing, even-tempered, and gentle"),
    ("Chihuahua", "Graceful, charming, and sassy"),
    ("Dalmatian", "Energetic, playful, and sensitive"),
    ("Border Collie", "Affectionate, smart, and energetic"),
    ("Husky", "Friendly, outgoing, and alert"),
    ("Shih Tzu", "Affectionate, playful, and outgoing"),
];

fn builtin_image(name: &str) -> Option<&'static str> {
    let url = match name {
        "Golden Retriever" => {
            "https://upload.wikimedia.org/wikipedia/commons/d/d9/Golden_Retriever_Carlos_%281055226016%29.jpg"
        }
        "German Shepherd" => {
            "https://upload.wikimedia.org/wikipedia/commons/3/3e/German_Shepherd_Dog.jpg"
        }
        "Pug" => "https://upload.wikimedia.org/wikipedia/commons/f/f0/Pug_600.jpg",
        "Beagle" => "https://upload.wikimedia.org/wikipedia/commons/5/52/Beagle_Upsy.jpg",
        "Labrador" => {
            "https://upload.wikimedia.org/wikipedia/commons/2/26/YellowLabradorLooking_new.jpg"
        }
        "Chihuahua" => "https://upload.wikimedia.org/wikipedia/commons/a/a4/Chihuahua1_bvdb.jpg",
        "Dalmatian" => "https://upload.wikimedia.org/wikipedia/commons/4/48/Dalmatiner.JPG",
        "Border Collie" => {
            "https://upload.wikimedia.org/wikipedia/commons/b/bc/Border_Collie_Puppy.jpg"
        }
        "Husky" => "https://upload.wikimedia.org/wikipedia/commons/3/32/Siberian_Husky_pho.jpg",
        "Shih Tzu" => "https://upload.wikimedia.org/wikipedia/commons/d/d2/Shih-Tzu.jpg",
        _ => return None,
    };
    Some(url)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreedEntry {
    pub name: String,
    pub description: String,
    pub image_ref: String,
}

impl BreedEntry {
    /// A missing `image_ref` becomes [`PLACEHOLDER_IMAGE`].
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        image_ref: Option<&str>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            image_ref: image_ref.unwrap_or(PLACEHOLDER_IMAGE).to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<BreedEntry>,
}

impl Catalog {
    /// Later duplicates of a name are dropped so names stay unique.
    pub fn new(entries: Vec<BreedEntry>) -> Self {
        let mut unique: Vec<BreedEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            if unique.iter().all(|e| e.name != entry.name) {
                unique.push(entry);
            }
        }
        Self { entries: unique }
    }

    pub fn builtin() -> Self {
        Self::new(
            BREEDS
                .iter()
                .map(|(name, description)| {
                    BreedEntry::new(*name, *description, builtin_image(name))
                })
                .collect(),
        )
    }

    pub fn all(&self) -> &[BreedEntry] {
        &self.entries
    }

    pub fn lookup(&self, name: &str) -> Option<&BreedEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
