pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS projects (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS cases (
    id               TEXT PRIMARY KEY,
    project_id       TEXT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    title            TEXT NOT NULL,
    wstg_id          TEXT NOT NULL,
    description      TEXT NOT NULL DEFAULT '',
    status           TEXT NOT NULL,
    severity         TEXT NOT NULL,
    notes            TEXT NOT NULL DEFAULT '',
    tags             TEXT NOT NULL DEFAULT '[]',
    target           TEXT,
    vuln_description TEXT,
    impact           TEXT,
    poc              TEXT,
    recommendation   TEXT,
    refs             TEXT,
    cvss_score       REAL,
    cvss_vector      TEXT,
    created_at       TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_cases_project ON cases(project_id);

CREATE TABLE IF NOT EXISTS progress (
    wstg_id TEXT PRIMARY KEY,
    entry   TEXT NOT NULL
);
"#;
