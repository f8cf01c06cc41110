use crate::domain::{AvailabilityStatus, Language};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phrase {
    Title,
    Subtitle,
    Bikes,
    Ebikes,
    Docks,
    Stations,
    Live,
    Updating,
    Updated,
    Connecting,
    About,
    AboutText,
    Close,
    Availability,
    High,
    Medium,
    Low,
    Empty,
    StationId,
    Classic,
    Installed,
    NotInstalled,
    Renting,
    NotRenting,
    Returning,
    NoReturns,
    ChargingStation,
    TotalBikes,
    StationCapacity,
    LastReported,
    Unknown,
    HighAvailability,
    Moderate,
    LowAvailability,
    LoadingTitle,
    LoadingText,
    ConnectionError,
    ErrorText,
    Settings,
    Basemap,
    CycleOsmDescription,
    OpenStreetMapDescription,
    Search,
    NoMatches,
    Help,
    Retry,
    DataSource,
    Attribution,
    Stale,
    Quit,
    Pan,
    Zoom,
    Find,
    Refresh,
    Language,
    KeyClick,
    KeyClickMap,
    KeyDrag,
    KeyScroll,
    OpenStation,
    ClosePanel,
    PanMap,
    ZoomInOut,
    SearchByName,
    RefreshNow,
    SettingsBasemap,
    CycleBasemap,
    SwitchLanguage,
    HelpCloseHint,
    SettingsHint,
    MaxZoom,
    Version,
    FeedNotRunning,
}

pub fn tr(language: Language, key: Phrase) -> &'static str {
    match language {
        Language::En => english(key),
        Language::Fr => french(key),
    }
}

/// Label used for a station's status badge in the detail panel.
pub fn status_badge(language: Language, status: AvailabilityStatus) -> &'static str {
    let key = match status {
        AvailabilityStatus::High => Phrase::HighAvailability,
        AvailabilityStatus::Medium => Phrase::Moderate,
        AvailabilityStatus::Low => Phrase::LowAvailability,
        AvailabilityStatus::Empty => Phrase::Empty,
        AvailabilityStatus::Unknown => Phrase::Unknown,
    };
    tr(language, key)
}

/// Short legend label for a status.
pub fn status_label(language: Language, status: AvailabilityStatus) -> &'static str {
    let key = match status {
        AvailabilityStatus::High => Phrase::High,
        AvailabilityStatus::Medium => Phrase::Medium,
        AvailabilityStatus::Low => Phrase::Low,
        AvailabilityStatus::Empty => Phrase::Empty,
        AvailabilityStatus::Unknown => Phrase::Unknown,
    };
    tr(language, key)
}

const fn english(key: Phrase) -> &'static str {
    match key {
        Phrase::Title => "Bixi Dashboard",
        Phrase::Subtitle => "Montreal Real-Time BIXI Stats",
        Phrase::Bikes => "Bikes",
        Phrase::Ebikes => "E-Bikes",
        Phrase::Docks => "Docks",
        Phrase::Stations => "Stations",
        Phrase::Live => "Live",
        Phrase::Updating => "Updating...",
        Phrase::Updated => "Updated",
        Phrase::Connecting => "Connecting...",
        Phrase::About => "About",
        Phrase::AboutText => "Real-time view of Montreal's BIXI bike-sharing system, sourced from the official BIXI GBFS feed.",
        Phrase::Close => "Close",
        Phrase::Availability => "Availability",
        Phrase::High => "High",
        Phrase::Medium => "Medium",
        Phrase::Low => "Low",
        Phrase::Empty => "Empty",
        Phrase::StationId => "ID",
        Phrase::Classic => "Classic",
        Phrase::Installed => "Installed",
        Phrase::NotInstalled => "Not Installed",
        Phrase::Renting => "Renting",
        Phrase::NotRenting => "Not Renting",
        Phrase::Returning => "Returning",
        Phrase::NoReturns => "No Returns",
        Phrase::ChargingStation => "Charging Station",
        Phrase::TotalBikes => "Total Bikes",
        Phrase::StationCapacity => "Station Capacity",
        Phrase::LastReported => "Last Reported",
        Phrase::Unknown => "Unknown",
        Phrase::HighAvailability => "High Availability",
        Phrase::Moderate => "Moderate",
        Phrase::LowAvailability => "Low Availability",
        Phrase::LoadingTitle => "Loading Bixi Stations",
        Phrase::LoadingText => "Fetching real-time data from Montreal...",
        Phrase::ConnectionError => "Connection Error",
        Phrase::ErrorText => "Unable to fetch station data. Showing the last known state.",
        Phrase::Settings => "Settings",
        Phrase::Basemap => "Basemap",
        Phrase::CycleOsmDescription => "Cycling-focused map with bike lanes and paths",
        Phrase::OpenStreetMapDescription => "Standard OpenStreetMap style",
        Phrase::Search => "Search stations",
        Phrase::NoMatches => "No matching stations",
        Phrase::Help => "Help",
        Phrase::Retry => "Press r to retry",
        Phrase::DataSource => "Data source",
        Phrase::Attribution => "Map data",
        Phrase::Stale => "Stale",
        Phrase::Quit => "Quit",
        Phrase::Pan => "Pan",
        Phrase::Zoom => "Zoom",
        Phrase::Find => "Search",
        Phrase::Refresh => "Refresh",
        Phrase::Language => "Language",
        Phrase::KeyClick => "Click",
        Phrase::KeyClickMap => "Click map",
        Phrase::KeyDrag => "Drag",
        Phrase::KeyScroll => "Scroll",
        Phrase::OpenStation => "Open the station under the pointer",
        Phrase::ClosePanel => "Close the station panel",
        Phrase::PanMap => "Pan the map",
        Phrase::ZoomInOut => "Zoom in / out",
        Phrase::SearchByName => "Search stations by name",
        Phrase::RefreshNow => "Refresh now",
        Phrase::SettingsBasemap => "Settings (basemap)",
        Phrase::CycleBasemap => "Cycle basemap",
        Phrase::SwitchLanguage => "Switch language (EN / FR)",
        Phrase::HelpCloseHint => "Press ? or Esc to close",
        Phrase::SettingsHint => "↑/↓ choose · Enter apply · Esc close",
        Phrase::MaxZoom => "max zoom",
        Phrase::Version => "Version",
        Phrase::FeedNotRunning => "Station feed is not running",
    }
}

const fn french(key: Phrase) -> &'static str {
    match key {
        Phrase::Title => "Tableau de bord BIXI",
        Phrase::Subtitle => "Statistiques BIXI en temps réel – Montréal",
        Phrase::Bikes => "Vélos",
        Phrase::Ebikes => "Vélos électriques",
        Phrase::Docks => "Points d'ancrage",
        Phrase::Stations => "Stations",
        Phrase::Live => "En direct",
        Phrase::Updating => "Mise à jour en cours...",
        Phrase::Updated => "Dernière mise à jour",
        Phrase::Connecting => "Connexion en cours...",
        Phrase::About => "À propos",
        Phrase::AboutText => "Visualisation en temps réel du réseau BIXI de Montréal, à partir du flux GBFS officiel de BIXI.",
        Phrase::Close => "Fermer",
        Phrase::Availability => "Disponibilité",
        Phrase::High => "Élevée",
        Phrase::Medium => "Moyenne",
        Phrase::Low => "Faible",
        Phrase::Empty => "Vide",
        Phrase::StationId => "ID",
        Phrase::Classic => "Classique",
        Phrase::Installed => "Installée",
        Phrase::NotInstalled => "Non installée",
        Phrase::Renting => "Location possible",
        Phrase::NotRenting => "Location impossible",
        Phrase::Returning => "Retours acceptés",
        Phrase::NoReturns => "Aucun retour",
        Phrase::ChargingStation => "Borne de recharge",
        Phrase::TotalBikes => "Total de vélos",
        Phrase::StationCapacity => "Capacité de la station",
        Phrase::LastReported => "Dernier signalement",
        Phrase::Unknown => "Inconnu",
        Phrase::HighAvailability => "Disponibilité élevée",
        Phrase::Moderate => "Modérée",
        Phrase::LowAvailability => "Disponibilité faible",
        Phrase::LoadingTitle => "Chargement des stations BIXI",
        Phrase::LoadingText => "Récupération des données en temps réel de Montréal...",
        Phrase::ConnectionError => "Erreur de connexion",
        Phrase::ErrorText => "Impossible de récupérer les données. Affichage du dernier état connu.",
        Phrase::Settings => "Paramètres",
        Phrase::Basemap => "Fond de carte",
        Phrase::CycleOsmDescription => "Carte axée sur le vélo avec pistes cyclables",
        Phrase::OpenStreetMapDescription => "Style OpenStreetMap standard",
        Phrase::Search => "Rechercher une station",
        Phrase::NoMatches => "Aucune station trouvée",
        Phrase::Help => "Aide",
        Phrase::Retry => "Appuyez sur r pour réessayer",
        Phrase::DataSource => "Source des données",
        Phrase::Attribution => "Données cartographiques",
        Phrase::Stale => "Périmé",
        Phrase::Quit => "Quitter",
        Phrase::Pan => "Déplacer",
        Phrase::Zoom => "Zoom",
        Phrase::Find => "Rechercher",
        Phrase::Refresh => "Actualiser",
        Phrase::Language => "Langue",
        Phrase::KeyClick => "Clic",
        Phrase::KeyClickMap => "Clic carte",
        Phrase::KeyDrag => "Glisser",
        Phrase::KeyScroll => "Molette",
        Phrase::OpenStation => "Ouvrir la station sous le pointeur",
        Phrase::ClosePanel => "Fermer le panneau de la station",
        Phrase::PanMap => "Déplacer la carte",
        Phrase::ZoomInOut => "Zoom avant / arrière",
        Phrase::SearchByName => "Rechercher une station par nom",
        Phrase::RefreshNow => "Actualiser maintenant",
        Phrase::SettingsBasemap => "Paramètres (fond de carte)",
        Phrase::CycleBasemap => "Changer de fond de carte",
        Phrase::SwitchLanguage => "Changer de langue (EN / FR)",
        Phrase::HelpCloseHint => "Appuyez sur ? ou Échap pour fermer",
        Phrase::SettingsHint => "↑/↓ choisir · Entrée appliquer · Échap fermer",
        Phrase::MaxZoom => "zoom max",
        Phrase::Version => "Version",
        Phrase::FeedNotRunning => "Le flux des stations n'est pas actif",
    }
}
