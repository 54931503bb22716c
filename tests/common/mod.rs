//! Common test helpers shared across the integration test suite.

#![allow(dead_code)]

use recdates::{
    convert_record_at, DateFormat, DriverSettings, FieldMap, FixedClock, ParseContext,
    WarningLog,
};

/// Year all tests treat as "now".
pub const CURRENT_YEAR: i32 = 2024;

/// Clock stuck at [`CURRENT_YEAR`].
pub fn clock() -> FixedClock {
    FixedClock(CURRENT_YEAR)
}

/// Install a test-friendly `tracing` subscriber; `RUST_LOG` selects the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Resolve `input` with `format` and return the canonical string.
pub fn canonical(format: DateFormat, input: &str) -> Option<String> {
    canonical_logged(format, input).0
}

/// Like [`canonical`], also returning the warnings reported.
pub fn canonical_logged(format: DateFormat, input: &str) -> (Option<String>, WarningLog) {
    let mut log = WarningLog::new();
    let clock = clock();
    let result = {
        let mut ctx = ParseContext::new("testi", "T1", &mut log, &clock);
        format
            .parse_date_range(input, &mut ctx)
            .map(|range| range.to_canonical_string())
    };
    (result, log)
}

/// Convert a whole record with settings for source `testi`.
pub fn convert(format: DateFormat, xml: &str) -> (FieldMap, WarningLog) {
    convert_with(format, xml, &DriverSettings::for_source("testi"))
}

/// Convert a whole record with explicit settings.
pub fn convert_with(
    format: DateFormat,
    xml: &str,
    settings: &DriverSettings,
) -> (FieldMap, WarningLog) {
    let mut log = WarningLog::new();
    let fields = convert_record_at(format, xml, settings, &mut log, &clock())
        .expect("record should be readable");
    (fields, log)
}

/// EAD component with a single `unitdate@normal`.
pub fn ead_component(id: &str, title: &str, normal: &str) -> String {
    format!(
        r#"<ead:c xmlns:ead="urn:isbn:1-931666-22-9" level="file" id="{id}">
            <ead:did>
                <ead:unittitle>{title}</ead:unittitle>
                <ead:unitdate normal="{normal}">{normal}</ead:unitdate>
            </ead:did>
        </ead:c>"#
    )
}

/// EAD3 component with a single `unitdate@normal`.
pub fn ead3_component(id: &str, title: &str, normal: &str) -> String {
    format!(
        r#"<c xmlns="http://ead3.archivists.org/schema/" id="{id}">
            <did>
                <unittitle>{title}</unittitle>
                <unitdate normal="{normal}">{normal}</unitdate>
            </did>
        </c>"#
    )
}

/// LIDO record with one event.
pub fn lido_record(id: &str, title: &str, event_type: &str, display_date: &str) -> String {
    format!(
        r#"<lido:lido xmlns:lido="http://www.lido-schema.org">
            <lido:lidoRecID lido:type="local">{id}</lido:lidoRecID>
            <lido:descriptiveMetadata xml:lang="fi">
                <lido:objectIdentificationWrap><lido:titleWrap><lido:titleSet>
                    <lido:appellationValue>{title}</lido:appellationValue>
                </lido:titleSet></lido:titleWrap></lido:objectIdentificationWrap>
                <lido:eventWrap><lido:eventSet><lido:event>
                    <lido:eventType><lido:term>{event_type}</lido:term></lido:eventType>
                    <lido:eventDate><lido:displayDate>{display_date}</lido:displayDate></lido:eventDate>
                </lido:event></lido:eventSet></lido:eventWrap>
            </lido:descriptiveMetadata>
        </lido:lido>"#
    )
}

/// Qualified DC record with one `dcterms:issued`.
pub fn qdc_record(id: &str, title: &str, issued: &str) -> String {
    format!(
        r#"<oai_qdc:qualifieddc xmlns:oai_qdc="http://worldcat.org/xmlschemas/qdc-1.0/"
                xmlns:dc="http://purl.org/dc/elements/1.1/"
                xmlns:dcterms="http://purl.org/dc/terms/">
            <dc:identifier>{id}</dc:identifier>
            <dc:title>{title}</dc:title>
            <dcterms:issued>{issued}</dcterms:issued>
        </oai_qdc:qualifieddc>"#
    )
}

/// MARCXML record with 001, 008, 245 `$a` and an optional 260 `$c`.
pub fn marcxml_record(id: &str, field_008: &str, title: &str, imprint: Option<&str>) -> String {
    let imprint = imprint
        .map(|c| {
            format!(
                r#"<marc:datafield tag="260" ind1=" " ind2=" "><marc:subfield code="c">{c}</marc:subfield></marc:datafield>"#
            )
        })
        .unwrap_or_default();
    format!(
        r#"<marc:record xmlns:marc="http://www.loc.gov/MARC21/slim">
            <marc:leader>00000nam a2200000 a 4500</marc:leader>
            <marc:controlfield tag="001">{id}</marc:controlfield>
            <marc:controlfield tag="008">{field_008}</marc:controlfield>
            <marc:datafield tag="245" ind1="1" ind2="0">
                <marc:subfield code="a">{title}</marc:subfield>
            </marc:datafield>
            {imprint}
        </marc:record>"#
    )
}
