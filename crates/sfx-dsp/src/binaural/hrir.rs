//! Measured head-related impulse responses
//!
//! Both tables come from one measurement at elevation 0°, azimuth 35°
//! (`elev0/H0e035a`), one table per ear. They are real-valued and tied to
//! the sample rate the measurement was taken at; nothing here resamples them.
//!
//! Only two responses are stored. Left/right symmetry lets the processor use
//! the same pair for both virtual speakers by swapping ear roles.

/// Number of taps in each impulse response
pub const HRIR_TAPS: usize = 128;

/// Front speaker heard at the ear on its own side (`H0e035a:right`)
#[rustfmt::skip]
pub const HRIR_SAME_SIDE: [f32; HRIR_TAPS] = [
    3.051758E-05, -9.155273E-05, 0.0, -3.051758E-05, 0.0, 0.0, -3.051758E-05, 0.0,
    3.051758E-05, -3.051758E-05, 0.0001220703, -0.0002441406, 0.0005187988, -0.0008239746, 0.001159668, -0.001525879,
    0.001708984, -0.001190186, 0.00177002, 0.003540039, 0.07894897, 0.05496216, -0.0843811, 0.04910278,
    -0.01040649, -0.04812622, 0.1194763, 0.0473938, 0.05877686, 0.1812744, 0.1342773, -0.04138184,
    0.0178833, 0.07678223, -0.06491089, -0.07385254, -0.003570557, -0.02050781, -0.05352783, -0.02703857,
    -0.006286621, -0.008636475, -0.01412964, -0.001068115, 0.01098633, 0.001190186, 0.001678467, 0.0002441406,
    -0.007873535, -0.005126953, -0.005859375, -0.008026123, 0.003570557, -0.001922607, -0.01358032, -0.0140686,
    -0.02481079, -0.03250122, -0.02755737, -0.03268433, -0.03244019, -0.02752686, -0.02813721, -0.02648926,
    -0.02243042, -0.02084351, -0.02212524, -0.01919556, -0.01629639, -0.01321411, -0.0128479, -0.01394653,
    -0.01318359, -0.0138855, -0.01242065, -0.01208496, -0.009429932, -0.006866455, -0.00491333, -0.004119873,
    -0.006744385, -0.005493164, -0.00567627, -0.005615234, -0.006378174, -0.006591797, -0.006866455, -0.008636475,
    -0.008422852, -0.007781982, -0.006500244, -0.006134033, -0.006164551, -0.006347656, -0.006500244, -0.005279541,
    -0.004547119, -0.004730225, -0.003326416, -0.002502441, -0.003387451, -0.004852295, -0.004333496, -0.003662109,
    -0.003570557, -0.002960205, -0.003234863, -0.002838135, -0.003051758, -0.003051758, -0.002258301, -0.002319336,
    -0.002105713, -0.002593994, -0.00213623, -0.001403809, -0.002105713, -0.001403809, -0.001281738, -0.000579834,
    0.0003662109, 0.000579834, 0.0002441406, 9.155273E-05, 0.0002441406, -0.0004577637, -0.0004882813, -0.0005493164,
];

/// Front speaker heard at the ear on the far side (`H0e035a:left`)
#[rustfmt::skip]
pub const HRIR_OPPOSITE_SIDE: [f32; HRIR_TAPS] = [
    -0.001403809, 0.0004272461, 0.000213623, -0.002349854, 0.004577637, -0.007415771, 0.008728027, 0.04992676,
    0.4217224, -0.08560181, -0.3598938, 0.06256104, -0.120636, 0.3086548, 0.1569519, 0.1011353,
    0.6803589, 0.2357178, -0.3146057, -0.01489258, 0.1029358, -0.2836609, -0.160614, -0.1195374,
    -0.08529663, -0.03036499, -0.1094666, 0.04547119, 0.01022339, -0.06161499, 0.02340698, 0.04217529,
    -0.1153564, -0.02075195, -0.003265381, -0.08087158, 0.009674072, 0.003967285, 0.0050354, 0.03936768,
    -0.003540039, -0.02700806, -0.03512573, -0.1175232, -0.1016235, -0.03149414, -0.06552124, -0.06185913,
    -0.02276611, -0.0133667, -0.006439209, -0.01403809, -0.006744385, 0.005279541, -0.002838135, -0.0173645,
    -0.003356934, -0.0001220703, 0.003112793, 0.002563477, -0.00177002, -0.003295898, -0.007141113, -0.007598877,
    -0.007415771, -0.003479004, -0.006561279, -0.01074219, -0.01330566, -0.01028442, -0.007507324, -0.005310059,
    -0.00668335, -0.007385254, -0.006011963, -0.007385254, -0.008575439, -0.003326416, -0.002746582, -0.0007629395,
    -0.00402832, -0.007293701, -0.004150391, -0.00491333, -0.00491333, -0.004089355, -0.003509521, -0.005065918,
    -0.002929688, -0.0009765625, 0.002166748, 0.005340576, 0.003601074, -0.0004577637, -0.001953125, -0.002716064,
    -0.001251221, -0.001068115, 0.0005187988, 0.001495361, -0.002166748, -0.006713867, -0.004486084, 0.000579834,
    0.00177002, 0.002105713, -0.0003967285, -0.001556396, -0.001586914, -0.002258301, -0.0003051758, 0.0008544922,
    -0.0006713867, -0.0004577637, 0.0005187988, 0.001953125, 0.003570557, 0.00479126, 0.003570557, 0.002563477,
    0.002563477, 0.003173828, 0.004547119, 0.006011963, 0.005584717, 0.004852295, 0.004486084, 0.002838135,
];
