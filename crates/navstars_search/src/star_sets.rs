//! Navigational star sets.

/// A navigational star: almanac number, Hipparcos number and name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavStar {
    pub number: u8,
    pub hip: u32,
    pub name: &'static str,
}

const fn star(number: u8, hip: u32, name: &'static str) -> NavStar {
    NavStar { number, hip, name }
}

/// The 57 selected stars of the Nautical Almanac, in almanac order.
pub const ANGLO_AMERICAN: [NavStar; 57] = [
    star(1, 677, "Alpheratz"),
    star(2, 2081, "Ankaa"),
    star(3, 3179, "Schedar"),
    star(4, 3419, "Diphda"),
    star(5, 7588, "Achernar"),
    star(6, 9884, "Hamal"),
    star(7, 13847, "Acamar"),
    star(8, 14135, "Menkar"),
    star(9, 15863, "Mirfak"),
    star(10, 21421, "Aldebaran"),
    star(11, 24436, "Rigel"),
    star(12, 24608, "Capella"),
    star(13, 25336, "Bellatrix"),
    star(14, 25428, "Elnath"),
    star(15, 26311, "Alnilam"),
    star(16, 27989, "Betelgeuse"),
    star(17, 30438, "Canopus"),
    star(18, 32349, "Sirius"),
    star(19, 33579, "Adhara"),
    star(20, 37279, "Procyon"),
    star(21, 37826, "Pollux"),
    star(22, 41037, "Avior"),
    star(23, 44816, "Suhail"),
    star(24, 45238, "Miaplacidus"),
    star(25, 46390, "Alphard"),
    star(26, 49669, "Regulus"),
    star(27, 54061, "Dubhe"),
    star(28, 57632, "Denebola"),
    star(29, 59803, "Gienah"),
    star(30, 60718, "Acrux"),
    star(31, 61084, "Gacrux"),
    star(32, 62956, "Alioth"),
    star(33, 65474, "Spica"),
    star(34, 67301, "Alkaid"),
    star(35, 68702, "Hadar"),
    star(36, 68933, "Menkent"),
    star(37, 69673, "Arcturus"),
    star(38, 71683, "Rigil Kentaurus"),
    star(39, 72622, "Zubenelgenubi"),
    star(40, 72607, "Kochab"),
    star(41, 76267, "Alphecca"),
    star(42, 80763, "Antares"),
    star(43, 82273, "Atria"),
    star(44, 84012, "Sabik"),
    star(45, 85927, "Shaula"),
    star(46, 86032, "Rasalhague"),
    star(47, 87833, "Eltanin"),
    star(48, 90185, "Kaus Australis"),
    star(49, 91262, "Vega"),
    star(50, 92855, "Nunki"),
    star(51, 97649, "Altair"),
    star(52, 100751, "Peacock"),
    star(53, 102098, "Deneb"),
    star(54, 107315, "Enif"),
    star(55, 109268, "Al Na'ir"),
    star(56, 113368, "Fomalhaut"),
    star(57, 113963, "Markab"),
];

/// Built-in star sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StarSet {
    #[default]
    AngloAmerican,
}

impl StarSet {
    pub const ALL: [Self; 1] = [Self::AngloAmerican];

    pub const fn key(self) -> &'static str {
        match self {
            Self::AngloAmerican => "AngloAmerican",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    pub const fn stars(self) -> &'static [NavStar] {
        match self {
            Self::AngloAmerican => &ANGLO_AMERICAN,
        }
    }

    /// Hipparcos numbers in almanac order.
    pub fn hip_numbers(self) -> Vec<u32> {
        self.stars().iter().map(|s| s.hip).collect()
    }
}

/// Name of a star in any built-in set.
pub fn star_name(hip: u32) -> Option<&'static str> {
    ANGLO_AMERICAN.iter().find(|s| s.hip == hip).map(|s| s.name)
}
