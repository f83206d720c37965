// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0

//! Raw driver enumerants.
//!
//! The binding cache talks to the driver in terms of the strongly typed enums in
//! [`crate::targets`] and [`crate::pixel_formats`].  Those enums convert to and from
//! the numeric values below at the [`crate::Driver`] boundary, so every backend
//! agrees on the same numbering regardless of which binding library it links.

pub mod gl {
    //! OpenGL enumerant values used by this crate.

    pub const NO_ERROR: u32 = 0;
    pub const INVALID_ENUM: u32 = 0x0500;
    pub const INVALID_VALUE: u32 = 0x0501;
    pub const INVALID_OPERATION: u32 = 0x0502;
    pub const STACK_OVERFLOW: u32 = 0x0503;
    pub const STACK_UNDERFLOW: u32 = 0x0504;
    pub const OUT_OF_MEMORY: u32 = 0x0505;
    pub const INVALID_FRAMEBUFFER_OPERATION: u32 = 0x0506;
    pub const CONTEXT_LOST: u32 = 0x0507;

    pub const TEXTURE0: u32 = 0x84C0;

    // texture targets
    pub const TEXTURE_1D: u32 = 0x0DE0;
    pub const TEXTURE_2D: u32 = 0x0DE1;
    pub const TEXTURE_3D: u32 = 0x806F;
    pub const TEXTURE_1D_ARRAY: u32 = 0x8C18;
    pub const TEXTURE_2D_ARRAY: u32 = 0x8C1A;
    pub const TEXTURE_2D_MULTISAMPLE: u32 = 0x9100;
    pub const TEXTURE_2D_MULTISAMPLE_ARRAY: u32 = 0x9102;
    pub const TEXTURE_CUBE_MAP: u32 = 0x8513;
    pub const TEXTURE_CUBE_MAP_ARRAY: u32 = 0x9009;
    pub const TEXTURE_RECTANGLE: u32 = 0x84F5;
    pub const TEXTURE_BUFFER: u32 = 0x8C2A;

    pub const TEXTURE_CUBE_MAP_POSITIVE_X: u32 = 0x8515;

    // buffer targets
    pub const ARRAY_BUFFER: u32 = 0x8892;
    pub const ATOMIC_COUNTER_BUFFER: u32 = 0x92C0;
    pub const COPY_READ_BUFFER: u32 = 0x8F36;
    pub const COPY_WRITE_BUFFER: u32 = 0x8F37;
    pub const DISPATCH_INDIRECT_BUFFER: u32 = 0x90EE;
    pub const DRAW_INDIRECT_BUFFER: u32 = 0x8F3F;
    pub const ELEMENT_ARRAY_BUFFER: u32 = 0x8893;
    pub const PIXEL_PACK_BUFFER: u32 = 0x88EB;
    pub const PIXEL_UNPACK_BUFFER: u32 = 0x88EC;
    pub const QUERY_BUFFER: u32 = 0x9192;
    pub const SHADER_STORAGE_BUFFER: u32 = 0x90D2;
    pub const TRANSFORM_FEEDBACK_BUFFER: u32 = 0x8C8E;
    pub const UNIFORM_BUFFER: u32 = 0x8A11;

    // framebuffer targets
    pub const FRAMEBUFFER: u32 = 0x8D40;
    pub const READ_FRAMEBUFFER: u32 = 0x8CA8;
    pub const DRAW_FRAMEBUFFER: u32 = 0x8CA9;
    pub const RENDERBUFFER: u32 = 0x8D41;

    // limits
    pub const MAX_TEXTURE_IMAGE_UNITS: u32 = 0x8872;
    pub const MAX_TRANSFORM_FEEDBACK_BUFFERS: u32 = 0x8E70;
    pub const MAX_UNIFORM_BUFFER_BINDINGS: u32 = 0x8A2F;
    pub const MAX_ATOMIC_COUNTER_BUFFER_BINDINGS: u32 = 0x92DC;
    pub const MAX_SHADER_STORAGE_BUFFER_BINDINGS: u32 = 0x90DD;
    pub const MAX_COLOR_ATTACHMENTS: u32 = 0x8CDF;
    pub const MAX_DRAW_BUFFERS: u32 = 0x8824;

    // capabilities
    pub const BLEND: u32 = 0x0BE2;
    pub const COLOR_LOGIC_OP: u32 = 0x0BF2;
    pub const CULL_FACE: u32 = 0x0B44;
    pub const DEBUG_OUTPUT: u32 = 0x92E0;
    pub const DEBUG_OUTPUT_SYNCHRONOUS: u32 = 0x8242;
    pub const DEPTH_CLAMP: u32 = 0x864F;
    pub const DEPTH_TEST: u32 = 0x0B71;
    pub const DITHER: u32 = 0x0BD0;
    pub const FRAMEBUFFER_SRGB: u32 = 0x8DB9;
    pub const LINE_SMOOTH: u32 = 0x0B20;
    pub const MULTISAMPLE: u32 = 0x809D;
    pub const POLYGON_OFFSET_FILL: u32 = 0x8037;
    pub const POLYGON_OFFSET_LINE: u32 = 0x2A02;
    pub const POLYGON_OFFSET_POINT: u32 = 0x2A01;
    pub const POLYGON_SMOOTH: u32 = 0x0B41;
    pub const PRIMITIVE_RESTART: u32 = 0x8F9D;
    pub const PRIMITIVE_RESTART_FIXED_INDEX: u32 = 0x8D69;
    pub const RASTERIZER_DISCARD: u32 = 0x8C89;
    pub const SAMPLE_ALPHA_TO_COVERAGE: u32 = 0x809E;
    pub const SAMPLE_ALPHA_TO_ONE: u32 = 0x809F;
    pub const SAMPLE_COVERAGE: u32 = 0x80A0;
    pub const SAMPLE_SHADING: u32 = 0x8C36;
    pub const SCISSOR_TEST: u32 = 0x0C11;
    pub const STENCIL_TEST: u32 = 0x0B90;
    pub const TEXTURE_CUBE_MAP_SEAMLESS: u32 = 0x884F;
    pub const PROGRAM_POINT_SIZE: u32 = 0x8642;

    // comparison functions
    pub const NEVER: u32 = 0x0200;
    pub const LESS: u32 = 0x0201;
    pub const EQUAL: u32 = 0x0202;
    pub const LEQUAL: u32 = 0x0203;
    pub const GREATER: u32 = 0x0204;
    pub const NOTEQUAL: u32 = 0x0205;
    pub const GEQUAL: u32 = 0x0206;
    pub const ALWAYS: u32 = 0x0207;

    // faces and winding
    pub const FRONT: u32 = 0x0404;
    pub const BACK: u32 = 0x0405;
    pub const FRONT_AND_BACK: u32 = 0x0408;
    pub const CW: u32 = 0x0900;
    pub const CCW: u32 = 0x0901;

    // blend factors
    pub const ZERO: u32 = 0;
    pub const ONE: u32 = 1;
    pub const SRC_COLOR: u32 = 0x0300;
    pub const ONE_MINUS_SRC_COLOR: u32 = 0x0301;
    pub const SRC_ALPHA: u32 = 0x0302;
    pub const ONE_MINUS_SRC_ALPHA: u32 = 0x0303;
    pub const DST_ALPHA: u32 = 0x0304;
    pub const ONE_MINUS_DST_ALPHA: u32 = 0x0305;
    pub const DST_COLOR: u32 = 0x0306;
    pub const ONE_MINUS_DST_COLOR: u32 = 0x0307;
    pub const SRC_ALPHA_SATURATE: u32 = 0x0308;
    pub const CONSTANT_COLOR: u32 = 0x8001;
    pub const ONE_MINUS_CONSTANT_COLOR: u32 = 0x8002;
    pub const CONSTANT_ALPHA: u32 = 0x8003;
    pub const ONE_MINUS_CONSTANT_ALPHA: u32 = 0x8004;

    // texture level parameters
    pub const TEXTURE_WIDTH: u32 = 0x1000;
    pub const TEXTURE_HEIGHT: u32 = 0x1001;
    pub const TEXTURE_INTERNAL_FORMAT: u32 = 0x1003;
    pub const TEXTURE_DEPTH: u32 = 0x8071;

    // sized internal formats
    pub const R8: u32 = 0x8229;
    pub const RG8: u32 = 0x822B;
    pub const RGB8: u32 = 0x8051;
    pub const RGBA8: u32 = 0x8058;
    pub const SRGB8_ALPHA8: u32 = 0x8C43;
    pub const RGBA16: u32 = 0x805B;
    pub const R16F: u32 = 0x822D;
    pub const R32F: u32 = 0x822E;
    pub const RG32F: u32 = 0x8230;
    pub const RGBA16F: u32 = 0x881A;
    pub const RGBA32F: u32 = 0x8814;
    pub const R32I: u32 = 0x8235;
    pub const R32UI: u32 = 0x8236;
    pub const DEPTH_COMPONENT24: u32 = 0x81A6;
    pub const DEPTH_COMPONENT32F: u32 = 0x8CAC;
    pub const DEPTH24_STENCIL8: u32 = 0x88F0;

    // compressed internal formats
    pub const COMPRESSED_RED: u32 = 0x8225;
    pub const COMPRESSED_RG: u32 = 0x8226;
    pub const COMPRESSED_RGB: u32 = 0x84ED;
    pub const COMPRESSED_RGBA: u32 = 0x84EE;
    pub const COMPRESSED_SRGB: u32 = 0x8C48;
    pub const COMPRESSED_SRGB_ALPHA: u32 = 0x8C49;
    pub const COMPRESSED_RED_RGTC1: u32 = 0x8DBB;
    pub const COMPRESSED_SIGNED_RED_RGTC1: u32 = 0x8DBC;
    pub const COMPRESSED_RG_RGTC2: u32 = 0x8DBD;
    pub const COMPRESSED_SIGNED_RG_RGTC2: u32 = 0x8DBE;
    pub const COMPRESSED_RGBA_BPTC_UNORM: u32 = 0x8E8C;
    pub const COMPRESSED_SRGB_ALPHA_BPTC_UNORM: u32 = 0x8E8D;
    pub const COMPRESSED_RGB_BPTC_SIGNED_FLOAT: u32 = 0x8E8E;
    pub const COMPRESSED_RGB_BPTC_UNSIGNED_FLOAT: u32 = 0x8E8F;
    pub const COMPRESSED_RGB8_ETC2: u32 = 0x9274;
    pub const COMPRESSED_SRGB8_ETC2: u32 = 0x9275;
    pub const COMPRESSED_RGBA8_ETC2_EAC: u32 = 0x9278;
    pub const COMPRESSED_R11_EAC: u32 = 0x9270;
    pub const COMPRESSED_RGB_S3TC_DXT1_EXT: u32 = 0x83F0;
    pub const COMPRESSED_RGBA_S3TC_DXT1_EXT: u32 = 0x83F1;
    pub const COMPRESSED_RGBA_S3TC_DXT3_EXT: u32 = 0x83F2;
    pub const COMPRESSED_RGBA_S3TC_DXT5_EXT: u32 = 0x83F3;

    // client pixel formats
    pub const RED: u32 = 0x1903;
    pub const RG: u32 = 0x8227;
    pub const RGB: u32 = 0x1907;
    pub const RGBA: u32 = 0x1908;
    pub const BGRA: u32 = 0x80E1;
    pub const RED_INTEGER: u32 = 0x8D94;
    pub const DEPTH_COMPONENT: u32 = 0x1902;
    pub const DEPTH_STENCIL: u32 = 0x84F9;

    // client data types
    pub const BYTE: u32 = 0x1400;
    pub const UNSIGNED_BYTE: u32 = 0x1401;
    pub const SHORT: u32 = 0x1402;
    pub const UNSIGNED_SHORT: u32 = 0x1403;
    pub const INT: u32 = 0x1404;
    pub const UNSIGNED_INT: u32 = 0x1405;
    pub const FLOAT: u32 = 0x1406;
    pub const HALF_FLOAT: u32 = 0x140B;
    pub const UNSIGNED_INT_24_8: u32 = 0x84FA;
}
