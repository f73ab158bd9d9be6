use std::path::Path;

use lofty::file::AudioFile;

/// Read the duration from the file's container header, if lofty understands it.
pub fn probe_duration_ms(path: &Path) -> Option<u64> {
    let tagged = lofty::read_from_path(path).ok()?;
    let ms = tagged.properties().duration().as_millis();
    // Zero means the header carried no length.
    if ms == 0 {
        None
    } else {
        u64::try_from(ms).ok()
    }
}
