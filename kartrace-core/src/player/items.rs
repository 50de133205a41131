use rand::distributions::{Distribution, Standard};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Item {
    // Beneficial
    Boost,
    Shield,

    // Detrimental (to everyone else)
    Slow,
}

impl Item {
    pub const ALL: [Item; 3] = [Item::Boost, Item::Shield, Item::Slow];
}

// Item boxes hand out every item with equal odds
impl Distribution<Item> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Item {
        Item::ALL[rng.gen_range(0..Item::ALL.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_every_item_can_be_rolled() {
        let mut rng = StdRng::seed_from_u64(7);
        let rolled: Vec<Item> = (0..200).map(|_| rng.gen()).collect();
        for item in Item::ALL {
            assert!(rolled.contains(&item));
        }
    }
}
