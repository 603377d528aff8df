//! Built-in maps, used when no maps directory is available.

use crate::descriptor::MapDescriptor;

/// A named map embedded in the crate.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinMap {
    pub name: &'static str,
    pub description: &'static str,
    pub text: &'static str,
}

const CLASSIC: &str = "\
24 14
XXXXXXXXXXXXXXXXXXXXXXXX
XE........~~..........EX
X.E..................E.X
X..##......##......##..X
X..##......##......##..X
X......................X
X~~~....********....~~~X
X~~~....********....~~~X
X......................X
X..##..XX......XX..##..X
X..##..XX......XX..##..X
X......................X
X..........P...........X
XXXXXXXXXXXXXXXXXXXXXXXX
";

const FORTRESS: &str = "\
24 14
XXXXXXXXXXXXXXXXXXXXXXXX
XE....................EX
X..XX..............XX..X
X..X................X..X
X......####..####......X
X......................X
X...~~~~........~~~~...X
X...~~~~........~~~~...X
X......................X
X......##XXXXXX##......X
X......#........#......X
X......#...P....#......X
X......................X
XXXXXXXXXXXXXXXXXXXXXXXX
";

const RIVER: &str = "\
24 14
XXXXXXXXXXXXXXXXXXXXXXXX
XE.........~~.........EX
X......................X
X....##....~~....##....X
X..........~~..........X
X~~~~~~~~..~~..~~~~~~~~X
X..........~~..........X
X....****..~~..****....X
X..........~~..........X
X....##....~~....##....X
X..........~~..........X
X..........~~..........X
X.........P............X
XXXXXXXXXXXXXXXXXXXXXXXX
";

/// All built-in maps, in menu order.
pub fn builtin_maps() -> &'static [BuiltinMap] {
    &[
        BuiltinMap {
            name: "classic",
            description: "Open field with brick cover",
            text: CLASSIC,
        },
        BuiltinMap {
            name: "fortress",
            description: "Walled base to defend",
            text: FORTRESS,
        },
        BuiltinMap {
            name: "river",
            description: "A river splits the field",
            text: RIVER,
        },
    ]
}

impl BuiltinMap {
    /// Parse this map. Built-in maps are validated by tests, so a
    /// failure here is a packaging defect.
    pub fn descriptor(&self) -> Result<MapDescriptor, crate::descriptor::MapError> {
        MapDescriptor::parse(self.text)
    }
}
