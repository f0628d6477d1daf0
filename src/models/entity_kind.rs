/// Kind of entity whose ids are harvested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum EntityKind {
    /// Members of parliament
    #[value(name = "mp")]
    Mp,
    /// Legislative initiatives
    #[value(name = "initiative")]
    Initiative,
    /// Plenary attendance records
    #[value(name = "attendance")]
    Attendance,
}

/// Static, per-kind description of the listing page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindProfile {
    /// Listing page path, relative to the site root
    pub path: &'static str,
    /// Server-generated token of the results grid, used to build the pager id
    pub pager_token: &'static str,
    /// Substring of the legislature `<select>` id
    pub legislature_label: &'static str,
    /// Substring of the id of the links carrying the entity id
    pub id_label: &'static str,
    /// Substring of the session `<select>` id, for kinds filtered by session
    pub session_label: Option<&'static str>,
    /// Substring of the title of the links carrying the session number
    pub number_label: Option<&'static str>,
}

const MP: KindProfile = KindProfile {
    path: "/DeputadoGP/Paginas/Deputados.aspx?more=1",
    pager_token: "g_4090e9c6_d794_4506_9ff9_3e6f8d30ec2d",
    legislature_label: "Legislatura",
    id_label: "hplNome",
    session_label: None,
    number_label: None,
};

const INITIATIVE: KindProfile = KindProfile {
    path: "/ActividadeParlamentar/Paginas/IniciativasLegislativas.aspx",
    pager_token: "g_889e27d8_462c_47cc_afea_c4a07765d8c7",
    legislature_label: "ddlLeg",
    id_label: "hplTitulo",
    session_label: Some("ddlSL"),
    number_label: None,
};

const ATTENDANCE: KindProfile = KindProfile {
    path: "/DeputadoGP/Paginas/reunioesplenarias.aspx",
    pager_token: "g_90441d47_53a9_460e_a62f_b50c50d57276",
    legislature_label: "Legislatura",
    id_label: "hplData",
    session_label: None,
    number_label: Some("n.º"),
};

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Mp, EntityKind::Initiative, EntityKind::Attendance];

    /// Name used on the command line and in file names
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Mp => "mp",
            EntityKind::Initiative => "initiative",
            EntityKind::Attendance => "attendance",
        }
    }

    pub fn profile(self) -> &'static KindProfile {
        match self {
            EntityKind::Mp => &MP,
            EntityKind::Initiative => &INITIATIVE,
            EntityKind::Attendance => &ATTENDANCE,
        }
    }

    /// Absolute listing url for this kind
    pub fn listing_url(self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.profile().path)
    }

    pub fn output_file_name(self) -> String {
        format!("{}_ids.txt", self.as_str())
    }

    pub fn cache_file_name(self) -> String {
        format!("{}_cache.json", self.as_str())
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
