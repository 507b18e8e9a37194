//! Static country → continent table.
//!
//! The table is closed: any country code outside it resolves to no continent,
//! which callers render as "Unknown". Continent names are kept in the
//! Portuguese form the downstream reports group by.

use std::collections::HashMap;
use std::sync::LazyLock;

const SOUTH_AMERICA: &str = "América do Sul";
const NORTH_AMERICA: &str = "América do Norte";
const EUROPE: &str = "Europa";

static COUNTRY_TO_CONTINENT: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        HashMap::from([
            ("BR", SOUTH_AMERICA), // Brasil
            ("AR", SOUTH_AMERICA), // Argentina
            ("CL", SOUTH_AMERICA), // Chile
            ("CA", NORTH_AMERICA), // Canadá
            ("US", NORTH_AMERICA), // Estados Unidos
            ("MX", NORTH_AMERICA), // México
            ("PT", EUROPE),        // Portugal
            ("ES", EUROPE),        // Espanha
            ("GB", EUROPE),        // Reino Unido
        ])
    });

/// Returns the continent name for an ISO country code, if the code is in the table.
///
/// Lookup is exact: codes are expected in upper case as the lookup API returns them.
pub fn continent_for(country_code: &str) -> Option<&'static str> {
    COUNTRY_TO_CONTINENT.get(country_code).copied()
}
