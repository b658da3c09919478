//! Constants of the BLS12-381 hash-to-curve suite. Field elements are little-endian `u64` limbs,
//! `c0` first for `Fp2` elements.

/// Base field size
pub const P: [u64; 6] = [
    0xB9FE_FFFF_FFFF_AAAB,
    0x1EAB_FFFE_B153_FFFF,
    0x6730_D2A0_F6B0_F624,
    0x6477_4B84_F385_12BF,
    0x4B1B_A7B6_434B_ACD7,
    0x1A01_11EA_397F_E69A,
];

/// Scalar field size (the order `r` of G1 and G2)
pub const R: [u64; 4] =
    [0xFFFF_FFFF_0000_0001, 0x53BD_A402_FFFE_5BFE, 0x3339_D808_09A1_D805, 0x73ED_A753_299D_7D48];

/// A' coefficient of the isogenous curve E' for G2
/// A' = 0xF0 * I
pub const ISO_A_G2: [u64; 12] =
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00];

/// B' coefficient of the isogenous curve E' for G2
/// B' = 0x03F4 * (1 + I)
pub const ISO_B_G2: [u64; 12] = [
    0x03F4, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x03F4, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
];

/// Z constant for G2 SWU: Z = -(2 + I)
pub const SWU_Z_G2: [u64; 12] =
    [P[0] - 2, P[1], P[2], P[3], P[4], P[5], P[0] - 1, P[1], P[2], P[3], P[4], P[5]];

/// Isogeny map x-numerator coefficients for G2
pub const ISO_X_NUM_G2: [[u64; 12]; 4] = [
    [
        0x6238_AAAA_AAAA_97D6,
        0x5C26_38E3_43D9_C71C,
        0x88B5_8423_C50A_E15D,
        0x32C5_2D39_FD3A_042A,
        0xBB5B_7A9A_47D7_ED85,
        0x05C7_5950_7E8E_333E,
        0x6238_AAAA_AAAA_97D6,
        0x5C26_38E3_43D9_C71C,
        0x88B5_8423_C50A_E15D,
        0x32C5_2D39_FD3A_042A,
        0xBB5B_7A9A_47D7_ED85,
        0x05C7_5950_7E8E_333E,
    ],
    [
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x26A9_FFFF_FFFF_C71A,
        0x1472_AAA9_CB8D_5555,
        0x9A20_8C6B_4F20_A418,
        0x984F_87AD_F7AE_0C7F,
        0x3212_6FCE_D787_C88F,
        0x1156_0BF1_7BAA_99BC,
    ],
    [
        0x26A9_FFFF_FFFF_C71E,
        0x1472_AAA9_CB8D_5555,
        0x9A20_8C6B_4F20_A418,
        0x984F_87AD_F7AE_0C7F,
        0x3212_6FCE_D787_C88F,
        0x1156_0BF1_7BAA_99BC,
        0x9354_FFFF_FFFF_E38D,
        0x0A39_5554_E5C6_AAAA,
        0xCD10_4635_A790_520C,
        0xCC27_C3D6_FBD7_063F,
        0x1909_37E7_6BC3_E447,
        0x08AB_05F8_BDD5_4CDE,
    ],
    [
        0x88E2_AAAA_AAAA_5ED1,
        0x7098_E38D_0F67_1C71,
        0x22D6_108F_142B_8575,
        0xCB14_B4E7_F4E8_10AA,
        0xED6D_EA69_1F5F_B614,
        0x171D_6541_FA38_CCFA,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
    ],
];

/// Isogeny map x-denominator coefficients for G2
pub const ISO_X_DEN_G2: [[u64; 12]; 3] = [
    [
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0xB9FE_FFFF_FFFF_AA63,
        0x1EAB_FFFE_B153_FFFF,
        0x6730_D2A0_F6B0_F624,
        0x6477_4B84_F385_12BF,
        0x4B1B_A7B6_434B_ACD7,
        0x1A01_11EA_397F_E69A,
    ],
    [
        0x0000_0000_0000_000C,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0xB9FE_FFFF_FFFF_AA9F,
        0x1EAB_FFFE_B153_FFFF,
        0x6730_D2A0_F6B0_F624,
        0x6477_4B84_F385_12BF,
        0x4B1B_A7B6_434B_ACD7,
        0x1A01_11EA_397F_E69A,
    ],
    [0x1, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0],
];

/// Isogeny map y-numerator coefficients for G2
pub const ISO_Y_NUM_G2: [[u64; 12]; 4] = [
    [
        0x12CF_C71C_71C6_D706,
        0xFC8C_25EB_F8C9_2F68,
        0xF544_39D8_7D27_E500,
        0x0F7D_A5D4_A07F_649B,
        0x59A4_C18B_076D_1193,
        0x1530_477C_7AB4_113B,
        0x12CF_C71C_71C6_D706,
        0xFC8C_25EB_F8C9_2F68,
        0xF544_39D8_7D27_E500,
        0x0F7D_A5D4_A07F_649B,
        0x59A4_C18B_076D_1193,
        0x1530_477C_7AB4_113B,
    ],
    [
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x6238_AAAA_AAAA_97BE,
        0x5C26_38E3_43D9_C71C,
        0x88B5_8423_C50A_E15D,
        0x32C5_2D39_FD3A_042A,
        0xBB5B_7A9A_47D7_ED85,
        0x05C7_5950_7E8E_333E,
    ],
    [
        0x26A9_FFFF_FFFF_C71C,
        0x1472_AAA9_CB8D_5555,
        0x9A20_8C6B_4F20_A418,
        0x984F_87AD_F7AE_0C7F,
        0x3212_6FCE_D787_C88F,
        0x1156_0BF1_7BAA_99BC,
        0x9354_FFFF_FFFF_E38F,
        0x0A39_5554_E5C6_AAAA,
        0xCD10_4635_A790_520C,
        0xCC27_C3D6_FBD7_063F,
        0x1909_37E7_6BC3_E447,
        0x08AB_05F8_BDD5_4CDE,
    ],
    [
        0xE1B3_71C7_1C71_8B10,
        0x4E79_097A_56DC_4BD9,
        0xB0E9_77C6_9AA2_7452,
        0x761B_0F37_A1E2_6286,
        0xFBF7_043D_E381_1AD0,
        0x124C_9AD4_3B6C_F79B,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
    ],
];

/// Isogeny map y-denominator coefficients for G2
pub const ISO_Y_DEN_G2: [[u64; 12]; 4] = [
    [
        0xB9FE_FFFF_FFFF_A8FB,
        0x1EAB_FFFE_B153_FFFF,
        0x6730_D2A0_F6B0_F624,
        0x6477_4B84_F385_12BF,
        0x4B1B_A7B6_434B_ACD7,
        0x1A01_11EA_397F_E69A,
        0xB9FE_FFFF_FFFF_A8FB,
        0x1EAB_FFFE_B153_FFFF,
        0x6730_D2A0_F6B0_F624,
        0x6477_4B84_F385_12BF,
        0x4B1B_A7B6_434B_ACD7,
        0x1A01_11EA_397F_E69A,
    ],
    [
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0xB9FE_FFFF_FFFF_A9D3,
        0x1EAB_FFFE_B153_FFFF,
        0x6730_D2A0_F6B0_F624,
        0x6477_4B84_F385_12BF,
        0x4B1B_A7B6_434B_ACD7,
        0x1A01_11EA_397F_E69A,
    ],
    [
        0x0000_0000_0000_0012,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0x0000_0000_0000_0000,
        0xB9FE_FFFF_FFFF_AA99,
        0x1EAB_FFFE_B153_FFFF,
        0x6730_D2A0_F6B0_F624,
        0x6477_4B84_F385_12BF,
        0x4B1B_A7B6_434B_ACD7,
        0x1A01_11EA_397F_E69A,
    ],
    [0x1, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0],
];

/// sqrt_ratio constant c3 = (c2 - 1) / 2, with c2 = (q - 1) / 2^3 and q = p^2
pub const SQRT_RATIO_C3: [u64; 12] = [
    0xB26A_A000_01C7_18E3,
    0xD7CE_D6B1_D763_82EA,
    0x3162_C338_3621_13CF,
    0x966B_F91E_D3E7_1B74,
    0xB292_E85A_8709_1A04,
    0x11D6_8619_C861_85C7,
    0xEF53_1493_3097_8EF0,
    0x050A_62CF_D16D_DCA6,
    0x466E_59E4_9349_E8BD,
    0x9E2D_C90E_50E7_046B,
    0x74BD_278E_AA22_F25E,
    0x002A_437A_4B8C_35FC,
];

/// sqrt_ratio constant c6 = Z^c2
pub const SQRT_RATIO_C6: [u64; 12] = [
    0xC810_84FB_EDE3_CC09,
    0xEE67_992F_72EC_05F4,
    0x77F7_6E17_0092_41C5,
    0x4839_5DAB_C2D3_435E,
    0x6831_E36D_6BD1_7FFE,
    0x06AF_0E04_37FF_400B,
    0xC810_84FB_EDE3_CC09,
    0xEE67_992F_72EC_05F4,
    0x77F7_6E17_0092_41C5,
    0x4839_5DAB_C2D3_435E,
    0x6831_E36D_6BD1_7FFE,
    0x06AF_0E04_37FF_400B,
];

/// sqrt_ratio constant c7 = Z^((c2 + 1) / 2)
pub const SQRT_RATIO_C7: [u64; 12] = [
    0xFE9D_9A32_3433_6D5E,
    0x6DFA_0340_C422_FB7E,
    0xE484_FCB2_7B8B_E0B3,
    0x57F1_57E1_7F0C_8DB4,
    0x6592_4CB0_B6F7_BB98,
    0x13DC_0969_311E_2BA5,
    0x1B86_84A6_76A8_1381,
    0x73C5_B0E0_2C05_EC38,
    0x2659_DC2F_8263_F1CA,
    0x9A83_0A2C_9691_28D2,
    0x21AC_F918_7D46_9D91,
    0x071D_42AC_9C54_001A,
];

/// Effective cofactor h_eff of G2 for hash-to-curve
pub const H_EFF_G2: [u64; 10] = [
    0xE802_0005_AAA9_5551,
    0x5989_4C0A_DEBB_F6B4,
    0xE954_CBC0_6689_F6A3,
    0x2EC0_EC69_D747_7C1A,
    0x6D82_BF01_5D12_12B0,
    0x329C_2F17_8731_DB95,
    0x9986_FF03_1508_FFE1,
    0x88E2_A8E9_145A_D768,
    0x584C_6A0E_A91B_3528,
    0x0BC6_9F08_F2EE_75B3,
];

/// Domain separation tag of the proof-of-possession signature scheme
pub const DST_POP: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// Domain separation tag of the basic signature scheme
pub const DST_BASIC: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_NUL_";

/// Domain separation tag of the message augmentation signature scheme
pub const DST_AUG: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_AUG_";

/// Default salt of KeyGen
pub const KEYGEN_SALT: &[u8] = b"BLS-SIG-KEYGEN-SALT-";
