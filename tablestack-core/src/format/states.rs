//! AP style state abbreviations.

/// Lower-cased state names, postal codes and common variants, sorted by key.
static AP_STATES: &[(&str, &str)] = &[
    ("ak", "Alaska"),
    ("al", "Ala."),
    ("ala", "Ala."),
    ("alabama", "Ala."),
    ("alaska", "Alaska"),
    ("american samao", "A.S."),
    ("american samoa", "A.S."),
    ("ar", "Ark."),
    ("ariz", "Ariz."),
    ("arizona", "Ariz."),
    ("ark", "Ark."),
    ("arkansas", "Ark."),
    ("as", "A.S."),
    ("az", "Ariz."),
    ("ca", "Calif."),
    ("calf", "Calif."),
    ("calif", "Calif."),
    ("california", "Calif."),
    ("co", "Colo."),
    ("colo", "Colo."),
    ("colorado", "Colo."),
    ("conn", "Conn."),
    ("connecticut", "Conn."),
    ("ct", "Conn."),
    ("dc", "D.C."),
    ("de", "Del."),
    ("del", "Del."),
    ("delaware", "Del."),
    ("deleware", "Del."),
    ("district of columbia", "D.C."),
    ("fl", "Fla."),
    ("fla", "Fla."),
    ("florida", "Fla."),
    ("ga", "Ga."),
    ("georgia", "Ga."),
    ("gu", "Guam"),
    ("guam", "Guam"),
    ("hawaii", "Hawaii"),
    ("hi", "Hawaii"),
    ("ia", "Iowa"),
    ("id", "Idaho"),
    ("idaho", "Idaho"),
    ("il", "Ill."),
    ("ill", "Ill."),
    ("illinois", "Ill."),
    ("in", "Ind."),
    ("ind", "Ind."),
    ("indiana", "Ind."),
    ("iowa", "Iowa"),
    ("kan", "Kan."),
    ("kans", "Kan."),
    ("kansas", "Kan."),
    ("kentucky", "Ky."),
    ("ks", "Kan."),
    ("ky", "Ky."),
    ("la", "La."),
    ("louisiana", "La."),
    ("ma", "Mass."),
    ("maine", "Maine"),
    ("marianas islands", "M.P."),
    ("marianas islands of the pacific", "M.P."),
    ("marinas islands of the pacific", "M.P."),
    ("maryland", "Md."),
    ("mass", "Mass."),
    ("massachusetts", "Mass."),
    ("massachussetts", "Mass."),
    ("md", "Md."),
    ("me", "Maine"),
    ("mi", "Mich."),
    ("mich", "Mich."),
    ("michigan", "Mich."),
    ("minn", "Minn."),
    ("minnesota", "Minn."),
    ("miss", "Miss."),
    ("mississippi", "Miss."),
    ("missouri", "Mo."),
    ("mn", "Minn."),
    ("mo", "Mo."),
    ("mont", "Mont."),
    ("montana", "Mont."),
    ("mp", "M.P."),
    ("ms", "Miss."),
    ("mt", "Mont."),
    ("n d", "N.D."),
    ("n dak", "N.D."),
    ("n h", "N.H."),
    ("n j", "N.J."),
    ("n m", "N.M."),
    ("n mex", "N.M."),
    ("nc", "N.C."),
    ("nd", "N.D."),
    ("ne", "Neb."),
    ("neb", "Neb."),
    ("nebr", "Neb."),
    ("nebraska", "Neb."),
    ("nev", "Nev."),
    ("nevada", "Nev."),
    ("new hampshire", "N.H."),
    ("new jersey", "N.J."),
    ("new mexico", "N.M."),
    ("new york", "N.Y."),
    ("nh", "N.H."),
    ("nj", "N.J."),
    ("nm", "N.M."),
    ("nmex", "N.M."),
    ("north carolina", "N.C."),
    ("north dakota", "N.D."),
    ("northern mariana islands", "M.P."),
    ("nv", "Nev."),
    ("ny", "N.Y."),
    ("oh", "Ohio"),
    ("ohio", "Ohio"),
    ("ok", "Okla."),
    ("okla", "Okla."),
    ("oklahoma", "Okla."),
    ("or", "Ore."),
    ("ore", "Ore."),
    ("oreg", "Ore."),
    ("oregon", "Ore."),
    ("pa", "Pa."),
    ("penn", "Pa."),
    ("pennsylvania", "Pa."),
    ("pr", "P.R."),
    ("puerto rico", "P.R."),
    ("rhode island", "R.I."),
    ("ri", "R.I."),
    ("s dak", "S.D."),
    ("sc", "S.C."),
    ("sd", "S.D."),
    ("sdak", "S.D."),
    ("south carolina", "S.C."),
    ("south dakota", "S.D."),
    ("tenn", "Tenn."),
    ("tennessee", "Tenn."),
    ("territory of hawaii", "Hawaii"),
    ("tex", "Texas"),
    ("texas", "Texas"),
    ("tn", "Tenn."),
    ("tx", "Texas"),
    ("us virgin islands", "V.I."),
    ("usvi", "V.I."),
    ("ut", "Utah"),
    ("utah", "Utah"),
    ("va", "Va."),
    ("vermont", "Vt."),
    ("vi", "V.I."),
    ("viginia", "Va."),
    ("virgin islands", "V.I."),
    ("virgina", "Va."),
    ("virginia", "Va."),
    ("vt", "Vt."),
    ("w va", "W.Va."),
    ("wa", "Wash."),
    ("wash", "Wash."),
    ("washington", "Wash."),
    ("west virginia", "W.Va."),
    ("wi", "Wis."),
    ("wis", "Wis."),
    ("wisc", "Wis."),
    ("wisconsin", "Wis."),
    ("wv", "W.Va."),
    ("wva", "W.Va."),
    ("wy", "Wyo."),
    ("wyo", "Wyo."),
    ("wyoming", "Wyo."),
];

/// Looks up the AP abbreviation for a state name or postal code.
pub fn lookup(value: &str) -> Option<&'static str> {
    let key = value.trim().to_lowercase();
    AP_STATES
        .binary_search_by(|(k, _)| (*k).cmp(key.as_str()))
        .ok()
        .map(|i| AP_STATES[i].1)
}
