//! Asset catalog for the Dark City prototype: characters with their
//! animation sets, tileset pieces, parallax backgrounds, UI elements,
//! combat effects and cutscene illustrations. Plain configuration data
//! consumed by the pipeline driver.

#[derive(Debug, Clone, Copy)]
pub struct AnimationSpec {
    pub name: &'static str,
    pub action: &'static str,
    pub frames: u32,
    pub frame_rate: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct CharacterSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub animations: &'static [AnimationSpec],
}

impl CharacterSpec {
    /// Track list in sheet order: animation name plus playback frame rate.
    pub fn sheet_tracks(&self) -> Vec<(String, u32)> {
        self.animations
            .iter()
            .map(|a| (a.name.to_string(), a.frame_rate))
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TileSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub width: u32,
    pub height: u32,
    pub no_background: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct BackgroundSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct UiSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub width: u32,
    pub height: u32,
    pub no_background: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct EffectSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct CutsceneSpec {
    pub filename: &'static str,
    pub description: &'static str,
}

const MURDOCH_ANIMS: &[AnimationSpec] = &[
    AnimationSpec { name: "idle", action: "full body character standing idle, arms at sides, entire body head to feet visible", frames: 2, frame_rate: 6 },
    AnimationSpec { name: "walk", action: "full body character walking, legs in stride, entire body head to feet visible", frames: 2, frame_rate: 8 },
    AnimationSpec { name: "run", action: "full body character running fast, legs in stride, entire body head to feet visible", frames: 2, frame_rate: 10 },
    AnimationSpec { name: "jump", action: "full body character jumping upward, legs bent, entire body head to feet visible", frames: 2, frame_rate: 8 },
    AnimationSpec { name: "fall", action: "full body character falling, legs dangling, entire body head to feet visible", frames: 2, frame_rate: 6 },
    AnimationSpec { name: "crouch", action: "full body character crouching low, knees bent, entire body head to feet visible", frames: 2, frame_rate: 4 },
    AnimationSpec { name: "punch", action: "full body character punching forward with fist, entire body head to feet visible", frames: 2, frame_rate: 12 },
    AnimationSpec { name: "kick", action: "full body character kicking with leg extended, entire body head to feet visible", frames: 2, frame_rate: 12 },
    AnimationSpec { name: "sword_slash", action: "full body character slashing sword, entire body head to feet visible", frames: 2, frame_rate: 10 },
    AnimationSpec { name: "tuning_activate", action: "full body character with glowing blue energy hands, entire body head to feet visible", frames: 2, frame_rate: 8 },
    AnimationSpec { name: "hurt", action: "full body character recoiling in pain, entire body head to feet visible", frames: 2, frame_rate: 8 },
    AnimationSpec { name: "death", action: "full body character collapsing to ground, entire body head to feet visible", frames: 2, frame_rate: 6 },
];

const STRANGER_GRUNT_ANIMS: &[AnimationSpec] = &[
    AnimationSpec { name: "idle", action: "full body character standing menacingly, entire body head to feet visible", frames: 2, frame_rate: 6 },
    AnimationSpec { name: "walk", action: "full body character walking forward, legs moving, entire body head to feet visible", frames: 2, frame_rate: 8 },
    AnimationSpec { name: "attack", action: "full body character lunging to attack with claws, entire body head to feet visible", frames: 2, frame_rate: 10 },
    AnimationSpec { name: "hurt", action: "full body character recoiling from damage, entire body head to feet visible", frames: 2, frame_rate: 8 },
    AnimationSpec { name: "death", action: "full body character dissolving into shadows, entire body head to feet visible", frames: 2, frame_rate: 6 },
];

const MR_SLEEP_ANIMS: &[AnimationSpec] = &[
    AnimationSpec { name: "idle", action: "full body character standing with creepy smile, entire body head to feet visible", frames: 2, frame_rate: 6 },
    AnimationSpec { name: "move", action: "full body character gliding forward eerily, entire body head to feet visible", frames: 2, frame_rate: 8 },
    AnimationSpec { name: "teleport_in", action: "full body character materializing from darkness, entire body head to feet visible", frames: 2, frame_rate: 10 },
    AnimationSpec { name: "teleport_out", action: "full body character vanishing into darkness, entire body head to feet visible", frames: 2, frame_rate: 10 },
    AnimationSpec { name: "lunge", action: "full body character lunging forward with claws, entire body head to feet visible", frames: 2, frame_rate: 12 },
    AnimationSpec { name: "death", action: "full body character crumbling and dissolving, entire body head to feet visible", frames: 2, frame_rate: 6 },
];

const MR_WALL_ANIMS: &[AnimationSpec] = &[
    AnimationSpec { name: "idle", action: "full body character standing with arms crossed, entire body head to feet visible", frames: 2, frame_rate: 6 },
    AnimationSpec { name: "walk", action: "full body character walking heavily, entire body head to feet visible", frames: 2, frame_rate: 8 },
    AnimationSpec { name: "charge", action: "full body character charging forward, entire body head to feet visible", frames: 2, frame_rate: 10 },
    AnimationSpec { name: "hurt", action: "full body character flinching from hit, entire body head to feet visible", frames: 2, frame_rate: 8 },
    AnimationSpec { name: "death", action: "full body character falling forward crashing, entire body head to feet visible", frames: 2, frame_rate: 6 },
];

const MR_HAND_ANIMS: &[AnimationSpec] = &[
    AnimationSpec { name: "idle", action: "full body character standing with hands behind back, entire body head to feet visible", frames: 2, frame_rate: 6 },
    AnimationSpec { name: "walk", action: "full body character walking with purpose, entire body head to feet visible", frames: 2, frame_rate: 8 },
    AnimationSpec { name: "punch", action: "full body character striking with telekinetic punch, entire body head to feet visible", frames: 2, frame_rate: 12 },
    AnimationSpec { name: "tuning_attack", action: "full body character projecting dark energy wave, entire body head to feet visible", frames: 2, frame_rate: 8 },
    AnimationSpec { name: "death", action: "full body character staggering and collapsing, entire body head to feet visible", frames: 2, frame_rate: 6 },
];

const MR_BOOK_ANIMS: &[AnimationSpec] = &[
    AnimationSpec { name: "hover_idle", action: "full body character hovering with dark energy, entire body head to feet visible", frames: 2, frame_rate: 6 },
    AnimationSpec { name: "telekinesis", action: "full body character raising hands with telekinesis, entire body head to feet visible", frames: 2, frame_rate: 8 },
    AnimationSpec { name: "summon", action: "full body character summoning dark portals, entire body head to feet visible", frames: 2, frame_rate: 10 },
    AnimationSpec { name: "slam", action: "full body character slamming hands creating shockwave, entire body head to feet visible", frames: 2, frame_rate: 12 },
    AnimationSpec { name: "death", action: "full body character exploding with energy, entire body head to feet visible", frames: 2, frame_rate: 6 },
];

pub const CHARACTERS: &[CharacterSpec] = &[
    CharacterSpec {
        name: "murdoch",
        description: "full body 2D side-scrolling platformer game character sprite, \
            entire body visible from head to feet, small figure in frame, \
            man wearing dark trench coat, brown hair, noir detective, \
            pixel art, side view profile, transparent background",
        animations: MURDOCH_ANIMS,
    },
    CharacterSpec {
        name: "stranger_grunt",
        description: "full body 2D side-scrolling platformer game character sprite, \
            entire body visible from head to feet, small figure in frame, \
            pale bald man in long black leather coat, sinister villain, \
            pixel art, side view profile, transparent background",
        animations: STRANGER_GRUNT_ANIMS,
    },
    CharacterSpec {
        name: "mr_sleep",
        description: "full body 2D side-scrolling platformer game character sprite, \
            entire body visible from head to feet, small figure in frame, \
            pale bald thin man in black coat, sharp teeth, creepy, \
            pixel art, side view profile, transparent background",
        animations: MR_SLEEP_ANIMS,
    },
    CharacterSpec {
        name: "mr_wall",
        description: "full body 2D side-scrolling platformer game character sprite, \
            entire body visible from head to feet, small figure in frame, \
            large muscular pale bald man in black coat, intimidating, \
            pixel art, side view profile, transparent background",
        animations: MR_WALL_ANIMS,
    },
    CharacterSpec {
        name: "mr_hand",
        description: "full body 2D side-scrolling platformer game character sprite, \
            entire body visible from head to feet, small figure in frame, \
            pale bald man in dark coat, calculating villain, \
            pixel art, side view profile, transparent background",
        animations: MR_HAND_ANIMS,
    },
    CharacterSpec {
        name: "mr_book",
        description: "full body 2D side-scrolling platformer game character sprite, \
            entire body visible from head to feet, small figure in frame, \
            pale bald man in ornate black coat, hovering villain leader, \
            pixel art, side view profile, transparent background",
        animations: MR_BOOK_ANIMS,
    },
];

pub const TILES: &[TileSpec] = &[
    TileSpec { name: "city_ground", description: "pixel art dark city street ground tile, asphalt, cracks, noir style, dark blues and grays, seamless", width: 32, height: 32, no_background: false },
    TileSpec { name: "city_wall", description: "pixel art dark city brick wall tile, gritty, noir, dark blues and grays, seamless", width: 32, height: 32, no_background: false },
    TileSpec { name: "city_window", description: "pixel art dark city building wall with lit window, warm light, noir, dark blues, seamless", width: 32, height: 32, no_background: false },
    TileSpec { name: "city_platform", description: "pixel art floating platform, dark metal ledge, side view, noir style", width: 32, height: 32, no_background: true },
    TileSpec { name: "underground_ground", description: "pixel art gothic underground stone floor tile, dark greens and bronze, seamless", width: 32, height: 32, no_background: false },
    TileSpec { name: "underground_wall", description: "pixel art gothic underground stone wall tile, moss, dark greens and bronze, seamless", width: 32, height: 32, no_background: false },
    TileSpec { name: "underground_platform", description: "pixel art floating stone platform, gothic, dark greens, side view", width: 32, height: 32, no_background: true },
    TileSpec { name: "lair_ground", description: "pixel art alien machine room floor tile, metal grates, dark purples and electric blues, seamless", width: 32, height: 32, no_background: false },
    TileSpec { name: "lair_wall", description: "pixel art alien machine room wall tile, circuits, dark purples and electric blues, seamless", width: 32, height: 32, no_background: false },
    TileSpec { name: "lair_platform", description: "pixel art floating alien platform, electric blue glow, side view", width: 32, height: 32, no_background: true },
];

pub const BACKGROUNDS: &[BackgroundSpec] = &[
    BackgroundSpec { name: "bg_city_far", description: "pixel art distant dark city skyline at night, tall skyscrapers, noir, moody, stars, parallax background layer", width: 400, height: 225 },
    BackgroundSpec { name: "bg_city_mid", description: "pixel art mid-distance dark buildings with lit windows, fire escapes, noir night scene, parallax background", width: 400, height: 225 },
    BackgroundSpec { name: "bg_underground", description: "pixel art underground lair entrance, gothic stone columns, arches, dim green torchlight, dark atmosphere", width: 400, height: 225 },
    BackgroundSpec { name: "bg_lair", description: "pixel art alien machine room background, dark purple walls, glowing circuits, electric blue machinery, sci-fi", width: 400, height: 225 },
    BackgroundSpec { name: "bg_boss_arena", description: "pixel art open arena with dark city skyline backdrop, dramatic lighting, rain, noir, boss fight arena", width: 400, height: 225 },
    BackgroundSpec { name: "bg_shell_beach", description: "pixel art sunrise over calm ocean with wooden pier, warm golden colors, peaceful, dawn, beautiful", width: 400, height: 225 },
];

pub const UI_ELEMENTS: &[UiSpec] = &[
    UiSpec { name: "menu_background", description: "pixel art dark city noir title screen background, moody skyline, dramatic spotlight, rain, game menu", width: 400, height: 225, no_background: false },
    UiSpec { name: "portrait_murdoch", description: "pixel art portrait of man with brown hair and determined expression, dark trench coat, noir style, face closeup", width: 48, height: 48, no_background: true },
];

pub const EFFECTS: &[EffectSpec] = &[
    EffectSpec { name: "tuning_glow", description: "pixel art blue energy wisp particles, glowing, magical, ethereal, transparent, dark background", width: 32, height: 32 },
    EffectSpec { name: "impact_sparks", description: "pixel art white and yellow impact sparks, hit effect, burst, combat, transparent", width: 32, height: 32 },
    EffectSpec { name: "dark_energy", description: "pixel art dark purple energy swirl, evil power, stranger tuning, transparent", width: 32, height: 32 },
    EffectSpec { name: "heal_particles", description: "pixel art blue and white healing particles, rising upward, soft glow, transparent, ethereal", width: 32, height: 32 },
];

pub const CUTSCENES: &[CutsceneSpec] = &[
    CutsceneSpec { filename: "cutscene_awakening_1.png", description: "Dark hotel bathroom with old porcelain bathtub filled with murky water, dim yellow light from a single bulb, cracked tile walls, noir atmosphere, steam rising, pixel art, dark noir atmosphere, cinematic, moody lighting" },
    CutsceneSpec { filename: "cutscene_awakening_2.png", description: "Dark hotel room at night, old rotary phone ringing on nightstand with glowing dial, shadowy body lying on the floor, moonlight through venetian blinds casting striped shadows, pixel art, dark noir atmosphere, cinematic, moody lighting" },
    CutsceneSpec { filename: "cutscene_awakening_3.png", description: "Long dark city corridor with Art Deco walls, shadowy figures with pale faces approaching from the far end, flickering overhead lights, fog rolling along the floor, ominous atmosphere, pixel art, dark noir atmosphere, cinematic, moody lighting" },
    CutsceneSpec { filename: "cutscene_truth_1.png", description: "Man in dark coat with glowing bright blue energy emanating from his outstretched hands, brick wall cracking and reshaping around him, blue particles floating, underground setting, pixel art, dark noir atmosphere, cinematic, moody lighting" },
    CutsceneSpec { filename: "cutscene_truth_2.png", description: "Massive gothic stone archway entrance to underground passage, carved alien symbols on the stone, stairs descending into deep darkness, faint blue-purple glow from below, abandoned city street above, pixel art, dark noir atmosphere, cinematic, moody lighting" },
    CutsceneSpec { filename: "cutscene_truth_3.png", description: "Dark city skyline at midnight, buildings impossibly warping and reshaping themselves, bending like liquid, surreal dreamlike architecture, clock tower striking twelve, stars swirling in the sky, pixel art, dark noir atmosphere, cinematic, moody lighting" },
    CutsceneSpec { filename: "cutscene_injection_1.png", description: "Man strapped to a large alien biomechanical machine with tubes and wires, underground lair with dark purple and blue lighting, strange apparatus surrounding him, sinister laboratory setting, pixel art, dark noir atmosphere, cinematic, moody lighting" },
    CutsceneSpec { filename: "cutscene_injection_2.png", description: "Massive explosion of bright blue psychic energy, metal restraints shattering into pieces, man at the center with arms outstretched, shockwave rippling outward, underground chamber cracking, pixel art, dark noir atmosphere, cinematic, moody lighting" },
    CutsceneSpec { filename: "cutscene_injection_3.png", description: "Man floating high above a dark city with immense glowing electric blue aura surrounding his body, arms spread wide, buildings far below, night sky with swirling energy, godlike power radiating, pixel art, dark noir atmosphere, cinematic, moody lighting" },
];

/// API calls a full generation run is expected to make: one base image per
/// character, one call per animation, plus every single-image entry.
pub fn expected_generation_count() -> usize {
    let character_calls: usize = CHARACTERS
        .iter()
        .map(|c| 1 + c.animations.len())
        .sum();
    character_calls + TILES.len() + BACKGROUNDS.len() + UI_ELEMENTS.len() + EFFECTS.len()
        + CUTSCENES.len()
}
